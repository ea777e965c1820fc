//! Error normalisation: every internal failure cause becomes exactly one
//! [`Error`] with a stable code and client-facing message.
//!
//! Storage, hashing and signing failures are logged here with full detail
//! and surface as `internal_error`; the HTTP adapter later replaces their
//! message with a generic one.

use serde_json::json;
use tracing::{debug, error, warn};

use super::constraints::FieldViolation;
use super::error::Error;
use super::ports::{CardPersistenceError, PasswordHashError, TokenError, UserPersistenceError};

/// Message for requests without a usable bearer credential.
pub const AUTH_REQUIRED_MESSAGE: &str = "authorization required";
/// Message for bearer credentials that fail verification.
pub const INVALID_TOKEN_MESSAGE: &str = "invalid or expired token";
/// Message for login attempts with an unknown email or wrong password.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "incorrect email or password";
/// Message for a well-formed user id with no record.
pub const USER_NOT_FOUND_MESSAGE: &str = "user not found";
/// Message for a well-formed card id with no record.
pub const CARD_NOT_FOUND_MESSAGE: &str = "card not found";
/// Message for deleting someone else's card.
pub const NOT_CARD_OWNER_MESSAGE: &str = "cannot delete another user's card";
/// Message for signing up with a taken email.
pub const DUPLICATE_EMAIL_MESSAGE: &str = "a user with this email already exists";
/// Message for requests that match no route.
pub const ROUTE_NOT_FOUND_MESSAGE: &str = "requested resource not found";

/// Map a field-level validation failure to `invalid_request`, naming the
/// offending field in the message and details.
///
/// # Examples
/// ```
/// use mesto::domain::{CardName, ErrorCode, failure::validation_error};
///
/// let violation = CardName::new("x").unwrap_err();
/// let error = validation_error(&violation);
/// assert_eq!(error.code(), ErrorCode::InvalidRequest);
/// assert_eq!(error.details().unwrap()["field"], "name");
/// ```
pub fn validation_error(violation: &impl FieldViolation) -> Error {
    Error::invalid_request(violation.to_string()).with_details(json!({
        "field": violation.field(),
        "code": violation.code(),
    }))
}

impl From<UserPersistenceError> for Error {
    fn from(value: UserPersistenceError) -> Self {
        match value {
            UserPersistenceError::DuplicateEmail { email } => {
                debug!(%email, "signup rejected: email already registered");
                Error::conflict(DUPLICATE_EMAIL_MESSAGE)
            }
            other => {
                error!(error = %other, "user repository failure");
                Error::internal(other.to_string())
            }
        }
    }
}

impl From<CardPersistenceError> for Error {
    fn from(value: CardPersistenceError) -> Self {
        error!(error = %value, "card repository failure");
        Error::internal(value.to_string())
    }
}

impl From<PasswordHashError> for Error {
    fn from(value: PasswordHashError) -> Self {
        error!(error = %value, "password hasher failure");
        Error::internal(value.to_string())
    }
}

impl From<TokenError> for Error {
    fn from(value: TokenError) -> Self {
        if value.is_rejection() {
            warn!(reason = %value, "bearer credential rejected");
            Error::unauthorized(INVALID_TOKEN_MESSAGE)
        } else {
            error!(error = %value, "token service failure");
            Error::internal(value.to_string())
        }
    }
}
