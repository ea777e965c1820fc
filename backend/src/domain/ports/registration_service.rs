//! Driving port for account creation.

use async_trait::async_trait;

use crate::domain::{Error, Registration, User};

/// Domain use-case port for signup.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Create an account and return its public profile.
    async fn register(&self, registration: Registration) -> Result<User, Error>;
}
