//! Port for issuing and verifying bearer credentials.
use crate::domain::{AccessToken, UserId, VerifiedCredential};

use super::define_port_error;

define_port_error! {
    /// Failures raised by token adapters.
    pub enum TokenError {
        /// The token could not be decoded.
        Malformed { message: String } => "token is malformed: {message}",
        /// The signature did not match the signing key.
        InvalidSignature => "token signature is invalid",
        /// The token is past its expiry.
        Expired => "token has expired",
        /// The subject claim is not a user identifier.
        InvalidSubject { subject: String } => "token subject is not a user id: {subject}",
        /// Signing a new token failed.
        Signing { message: String } => "token signing failed: {message}",
    }
}

impl TokenError {
    /// Whether the failure lies with the presented token rather than the
    /// service.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::Signing { .. })
    }
}

/// Token Issuer/Verifier port.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Issue a token naming `subject`.
    fn issue(&self, subject: &UserId) -> Result<AccessToken, TokenError>;

    /// Verify signature and expiry and recover the claims.
    fn verify(&self, token: &str) -> Result<VerifiedCredential, TokenError>;
}
