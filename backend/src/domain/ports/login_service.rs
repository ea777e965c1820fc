//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call it to exchange credentials for a bearer token
//! without knowing the backing infrastructure, so HTTP handler tests can
//! substitute a test double instead of wiring persistence.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, SignIn};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and issue a token.
    ///
    /// Unknown emails and wrong passwords both fail with the same
    /// `unauthorized` error.
    async fn login(&self, credentials: &LoginCredentials) -> Result<SignIn, Error>;
}
