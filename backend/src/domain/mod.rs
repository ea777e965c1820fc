//! Domain primitives, services and ports.
//!
//! Purpose: Define strongly typed entities for profiles and cards, the
//! authentication primitives, and the services that enforce validation,
//! ownership and like-set rules. Keep types immutable and document
//! invariants and serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload and category.
//! - User, Card and their value types: validated on construction.
//! - Authenticator: bearer credential to [`AuthContext`].
//! - UserAccountService / CardService: implementations of the driving ports.

pub mod auth;
pub mod authenticator;
pub mod card;
pub mod card_service;
mod constraints;
pub mod error;
pub mod failure;
pub mod ownership;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_account_service;

pub use self::auth::{
    AccessToken, AuthContext, LoginCredentials, LoginValidationError, PASSWORD_MIN, Password,
    PasswordHash, Registration, SignIn, StoredCredentials, VerifiedCredential,
};
pub use self::authenticator::{Authenticator, BEARER_PREFIX};
pub use self::card::{
    CARD_NAME_MAX, CARD_NAME_MIN, Card, CardId, CardLink, CardName, CardValidationError, NewCard,
};
pub use self::card_service::CardService;
pub use self::constraints::{FieldViolation, RESOURCE_ID_LEN};
pub use self::error::{Error, ErrorCode, ErrorValidationError, INTERNAL_ERROR_MESSAGE};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    ABOUT_MAX, ABOUT_MIN, About, AvatarUrl, DEFAULT_ABOUT, DEFAULT_AVATAR, DEFAULT_USER_NAME,
    Email, Profile, ProfileUpdate, USER_NAME_MAX, USER_NAME_MIN, User, UserId, UserName,
    UserValidationError,
};
pub use self::user_account_service::UserAccountService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use mesto::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
