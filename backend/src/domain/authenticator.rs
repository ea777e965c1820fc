//! Turns a request's bearer credential into a verified identity.

use std::sync::Arc;

use tracing::debug;

use super::auth::AuthContext;
use super::error::Error;
use super::failure::AUTH_REQUIRED_MESSAGE;
use super::ports::TokenService;

/// Authorization scheme prefix, including the separating space.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Verifies bearer credentials with a [`TokenService`].
#[derive(Clone)]
pub struct Authenticator {
    tokens: Arc<dyn TokenService>,
}

impl Authenticator {
    /// Create an authenticator backed by `tokens`.
    pub fn new(tokens: Arc<dyn TokenService>) -> Self {
        Self { tokens }
    }

    /// Authenticate the raw `Authorization` header value.
    ///
    /// A missing header, a different scheme or an empty token fail with
    /// `unauthorized` before the token service is consulted.
    pub fn authenticate(&self, header: Option<&str>) -> Result<AuthContext, Error> {
        let Some(token) = header.and_then(|value| value.strip_prefix(BEARER_PREFIX)) else {
            debug!("request carries no bearer credential");
            return Err(Error::unauthorized(AUTH_REQUIRED_MESSAGE));
        };
        let token = token.trim();
        if token.is_empty() {
            return Err(Error::unauthorized(AUTH_REQUIRED_MESSAGE));
        }
        let credential = self.tokens.verify(token)?;
        Ok(AuthContext::from(credential))
    }
}
