//! User profile data model.
//!
//! Every field type validates on construction, so a [`User`] in hand always
//! satisfies the profile constraints. The password hash is deliberately not
//! part of [`User`]; it only travels inside
//! [`crate::domain::StoredCredentials`].

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::constraints::{
    FieldViolation, LengthViolation, check_char_length, is_email, parse_resource_id, parse_web_url,
};

/// Minimum length of a user name.
pub const USER_NAME_MIN: usize = 2;
/// Maximum length of a user name.
pub const USER_NAME_MAX: usize = 30;
/// Minimum length of the "about" blurb.
pub const ABOUT_MIN: usize = 2;
/// Maximum length of the "about" blurb.
pub const ABOUT_MAX: usize = 200;
/// Maximum length of an email address.
pub const EMAIL_MAX: usize = 254;

/// Name given to accounts that sign up without one.
pub const DEFAULT_USER_NAME: &str = "Жак-Ив Кусто";
/// Blurb given to accounts that sign up without one.
pub const DEFAULT_ABOUT: &str = "Исследователь";
/// Avatar given to accounts that sign up without one.
pub const DEFAULT_AVATAR: &str =
    "https://pictures.s3.yandex.net/resources/jacques-cousteau_1604399756.png";

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    InvalidId,
    NameTooShort { min: usize },
    NameTooLong { max: usize },
    AboutTooShort { min: usize },
    AboutTooLong { max: usize },
    InvalidAvatar,
    InvalidEmail,
    PasswordTooShort { min: usize },
    EmptyProfileUpdate,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "user id must be a valid identifier"),
            Self::NameTooShort { min } => write!(f, "name must be at least {min} characters"),
            Self::NameTooLong { max } => write!(f, "name must be at most {max} characters"),
            Self::AboutTooShort { min } => write!(f, "about must be at least {min} characters"),
            Self::AboutTooLong { max } => write!(f, "about must be at most {max} characters"),
            Self::InvalidAvatar => write!(f, "avatar must be an http(s) URL"),
            Self::InvalidEmail => write!(f, "email must be a valid email address"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
            Self::EmptyProfileUpdate => write!(f, "provide name or about to update"),
        }
    }
}

impl std::error::Error for UserValidationError {}

impl FieldViolation for UserValidationError {
    fn field(&self) -> &'static str {
        match self {
            Self::InvalidId => "userId",
            Self::NameTooShort { .. } | Self::NameTooLong { .. } => "name",
            Self::AboutTooShort { .. } | Self::AboutTooLong { .. } => "about",
            Self::InvalidAvatar => "avatar",
            Self::InvalidEmail => "email",
            Self::PasswordTooShort { .. } => "password",
            Self::EmptyProfileUpdate => "body",
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::InvalidId => "invalid_id",
            Self::NameTooShort { .. } | Self::AboutTooShort { .. } => "too_short",
            Self::NameTooLong { .. } | Self::AboutTooLong { .. } => "too_long",
            Self::InvalidAvatar => "invalid_url",
            Self::InvalidEmail => "invalid_email",
            Self::PasswordTooShort { .. } => "too_short",
            Self::EmptyProfileUpdate => "empty_update",
        }
    }
}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from its canonical string form.
    ///
    /// # Examples
    /// ```
    /// use mesto::domain::UserId;
    ///
    /// assert!(UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").is_ok());
    /// assert!(UserId::new("64a5f0c2e4b0a1b2c3d4e5f6").is_err());
    /// ```
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        parse_resource_id(id.as_ref())
            .map(Self)
            .ok_or(UserValidationError::InvalidId)
    }

    /// Wrap an identifier read back from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

macro_rules! bounded_text {
    (
        $(#[$meta:meta])*
        $name:ident, $min:expr, $max:expr, $too_short:ident, $too_long:ident, $default:expr
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and construct the value from owned input.
            pub fn new(value: impl Into<String>) -> Result<Self, UserValidationError> {
                let value = value.into();
                match check_char_length(&value, $min, $max) {
                    Ok(()) => Ok(Self(value)),
                    Err(LengthViolation::TooShort) => {
                        Err(UserValidationError::$too_short { min: $min })
                    }
                    Err(LengthViolation::TooLong) => {
                        Err(UserValidationError::$too_long { max: $max })
                    }
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self($default.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_ref())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = UserValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

bounded_text!(
    /// Display name shown on the profile.
    UserName, USER_NAME_MIN, USER_NAME_MAX, NameTooShort, NameTooLong, DEFAULT_USER_NAME
);

bounded_text!(
    /// Free-text blurb shown under the name.
    About, ABOUT_MIN, ABOUT_MAX, AboutTooShort, AboutTooLong, DEFAULT_ABOUT
);

/// Profile picture location; always an absolute `http`/`https` URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AvatarUrl(String);

impl AvatarUrl {
    /// Validate and construct an [`AvatarUrl`].
    pub fn new(value: impl Into<String>) -> Result<Self, UserValidationError> {
        let value = value.into();
        parse_web_url(&value)
            .map(|_| Self(value))
            .ok_or(UserValidationError::InvalidAvatar)
    }
}

impl Default for AvatarUrl {
    fn default() -> Self {
        Self(DEFAULT_AVATAR.to_owned())
    }
}

impl AsRef<str> for AvatarUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<AvatarUrl> for String {
    fn from(value: AvatarUrl) -> Self {
        value.0
    }
}

impl TryFrom<String> for AvatarUrl {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Login email; normalised to trimmed lower case so lookups and the
/// uniqueness constraint agree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and normalise an email address.
    ///
    /// # Examples
    /// ```
    /// use mesto::domain::Email;
    ///
    /// let email = Email::new("  A@B.com ").unwrap();
    /// assert_eq!(email.as_ref(), "a@b.com");
    /// ```
    pub fn new(value: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalized = value.as_ref().trim().to_lowercase();
        if normalized.len() > EMAIL_MAX || !is_email(&normalized) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(normalized))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Editable profile fields chosen at signup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Profile {
    pub name: UserName,
    pub about: About,
    pub avatar: AvatarUrl,
}

impl Profile {
    /// Build a profile from optional inputs, defaulting omitted fields.
    pub fn from_optional(
        name: Option<&str>,
        about: Option<&str>,
        avatar: Option<&str>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self {
            name: name.map(UserName::new).transpose()?.unwrap_or_default(),
            about: about.map(About::new).transpose()?.unwrap_or_default(),
            avatar: avatar.map(AvatarUrl::new).transpose()?.unwrap_or_default(),
        })
    }
}

/// Partial profile change for `PATCH /users/me`.
///
/// ## Invariants
/// - At least one of `name` and `about` is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    name: Option<UserName>,
    about: Option<About>,
}

impl ProfileUpdate {
    /// Validate a partial update.
    pub fn try_from_parts(
        name: Option<&str>,
        about: Option<&str>,
    ) -> Result<Self, UserValidationError> {
        let name = name.map(UserName::new).transpose()?;
        let about = about.map(About::new).transpose()?;
        if name.is_none() && about.is_none() {
            return Err(UserValidationError::EmptyProfileUpdate);
        }
        Ok(Self { name, about })
    }

    /// New name, if it changes.
    pub fn name(&self) -> Option<&UserName> {
        self.name.as_ref()
    }

    /// New blurb, if it changes.
    pub fn about(&self) -> Option<&About> {
        self.about.as_ref()
    }
}

/// Public view of an identity.
///
/// ## Invariants
/// - Every field satisfies its value type's constraints.
/// - No credential material is reachable from this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    name: UserName,
    about: About,
    avatar: AvatarUrl,
    email: Email,
}

impl User {
    /// Assemble a user from validated parts.
    pub fn new(id: UserId, profile: Profile, email: Email) -> Self {
        let Profile {
            name,
            about,
            avatar,
        } = profile;
        Self {
            id,
            name,
            about,
            avatar,
            email,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Profile blurb.
    pub fn about(&self) -> &About {
        &self.about
    }

    /// Avatar URL.
    pub fn avatar(&self) -> &AvatarUrl {
        &self.avatar
    }

    /// Login email.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Copy of this user with `update` applied.
    pub fn with_update(&self, update: &ProfileUpdate) -> Self {
        let mut updated = self.clone();
        if let Some(name) = update.name() {
            updated.name = name.clone();
        }
        if let Some(about) = update.about() {
            updated.about = about.clone();
        }
        updated
    }

    /// Copy of this user with a new avatar.
    pub fn with_avatar(&self, avatar: AvatarUrl) -> Self {
        Self {
            avatar,
            ..self.clone()
        }
    }
}
