//! Authentication primitives: passwords, credentials, tokens and the
//! verified request identity.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use chrono::{DateTime, Utc};
use zeroize::Zeroizing;

use super::constraints::FieldViolation;
use super::user::{Email, Profile, User, UserId, UserValidationError};

/// Minimum number of characters in a password chosen at signup.
pub const PASSWORD_MIN: usize = 6;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or not an address.
    InvalidEmail,
    /// Password was shorter than any password accepted at signup.
    PasswordTooShort { min: usize },
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail => write!(f, "email must be a valid email address"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
        }
    }
}

impl std::error::Error for LoginValidationError {}

impl FieldViolation for LoginValidationError {
    fn field(&self) -> &'static str {
        match self {
            Self::InvalidEmail => "email",
            Self::PasswordTooShort { .. } => "password",
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::InvalidEmail => "invalid_email",
            Self::PasswordTooShort { .. } => "too_short",
        }
    }
}

/// Plain-text password held in memory that is wiped on drop.
///
/// Whitespace is preserved; `" secret "` and `"secret"` are different
/// passwords.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Accept a password chosen at signup.
    pub fn new(value: &str) -> Result<Self, UserValidationError> {
        Self::checked(value).ok_or(UserValidationError::PasswordTooShort { min: PASSWORD_MIN })
    }

    /// Accept a password presented at login.
    pub fn presented(value: &str) -> Result<Self, LoginValidationError> {
        Self::checked(value).ok_or(LoginValidationError::PasswordTooShort { min: PASSWORD_MIN })
    }

    fn checked(value: &str) -> Option<Self> {
        (value.chars().count() >= PASSWORD_MIN).then(|| Self(Zeroizing::new(value.to_owned())))
    }

    /// Expose the secret for hashing.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(**redacted**)")
    }
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is normalised the same way as at signup.
/// - `password` meets the signup minimum and keeps caller-provided
///   whitespace.
///
/// # Examples
/// ```
/// use mesto::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("Ada@Example.com", "password").unwrap();
/// assert_eq!(creds.email().as_ref(), "ada@example.com");
/// assert_eq!(creds.password().expose(), "password");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: Email,
    password: Password,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = Email::new(email).map_err(|_| LoginValidationError::InvalidEmail)?;
        let password = Password::presented(password)?;
        Ok(Self { email, password })
    }

    /// Email used for the credential lookup.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &Password {
        &self.password
    }
}

/// Validated signup request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub email: Email,
    pub password: Password,
    pub profile: Profile,
}

impl Registration {
    /// Validate raw signup inputs, defaulting the optional profile fields.
    pub fn try_from_parts(
        email: &str,
        password: &str,
        name: Option<&str>,
        about: Option<&str>,
        avatar: Option<&str>,
    ) -> Result<Self, UserValidationError> {
        let email = Email::new(email)?;
        let password = Password::new(password)?;
        let profile = Profile::from_optional(name, about, avatar)?;
        Ok(Self {
            email,
            password,
            profile,
        })
    }
}

/// Salted one-way password hash in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash produced by a hasher or read from storage.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded PHC string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(**redacted**)")
    }
}

/// Credential record looked up at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    pub user: User,
    pub password_hash: PasswordHash,
}

/// Signed, compact bearer credential handed to clients.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap an encoded token.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded token string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(**redacted**)")
    }
}

/// Claims recovered from a token whose signature and expiry checked out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifiedCredential {
    subject_id: UserId,
    expires_at: DateTime<Utc>,
}

impl VerifiedCredential {
    /// Record the verified subject and expiry.
    pub fn new(subject_id: UserId, expires_at: DateTime<Utc>) -> Self {
        Self {
            subject_id,
            expires_at,
        }
    }

    /// Identity the token was issued to.
    pub fn subject_id(&self) -> &UserId {
        &self.subject_id
    }

    /// Instant after which the token is rejected.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

/// Authenticated identity attached to a request.
///
/// Only obtainable from a [`VerifiedCredential`]; handlers can read the
/// subject but never set it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    subject_id: UserId,
}

impl AuthContext {
    /// Identity making the request.
    pub fn subject_id(&self) -> &UserId {
        &self.subject_id
    }
}

impl From<VerifiedCredential> for AuthContext {
    fn from(value: VerifiedCredential) -> Self {
        Self {
            subject_id: value.subject_id,
        }
    }
}

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignIn {
    pub token: AccessToken,
    pub user: User,
}
