//! Content card data model.
//!
//! A card is a named link posted by one user. Any authenticated user may add
//! themselves to, or remove themselves from, the card's like set; only the
//! owner may delete it.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::constraints::{
    FieldViolation, LengthViolation, check_char_length, parse_resource_id, parse_web_url,
};
use super::user::UserId;

/// Minimum length of a card name.
pub const CARD_NAME_MIN: usize = 2;
/// Maximum length of a card name.
pub const CARD_NAME_MAX: usize = 30;

/// Validation errors returned by the card value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardValidationError {
    InvalidId,
    NameTooShort { min: usize },
    NameTooLong { max: usize },
    InvalidLink,
}

impl fmt::Display for CardValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "card id must be a valid identifier"),
            Self::NameTooShort { min } => write!(f, "name must be at least {min} characters"),
            Self::NameTooLong { max } => write!(f, "name must be at most {max} characters"),
            Self::InvalidLink => write!(f, "link must be an http(s) URL"),
        }
    }
}

impl std::error::Error for CardValidationError {}

impl FieldViolation for CardValidationError {
    fn field(&self) -> &'static str {
        match self {
            Self::InvalidId => "cardId",
            Self::NameTooShort { .. } | Self::NameTooLong { .. } => "name",
            Self::InvalidLink => "link",
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::InvalidId => "invalid_id",
            Self::NameTooShort { .. } => "too_short",
            Self::NameTooLong { .. } => "too_long",
            Self::InvalidLink => "invalid_url",
        }
    }
}

/// Stable card identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CardId(Uuid);

impl CardId {
    /// Validate and construct a [`CardId`] from its canonical string form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, CardValidationError> {
        parse_resource_id(id.as_ref())
            .map(Self)
            .ok_or(CardValidationError::InvalidId)
    }

    /// Wrap an identifier read back from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a new random [`CardId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl From<CardId> for String {
    fn from(value: CardId) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for CardId {
    type Error = CardValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Card title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CardName(String);

impl CardName {
    /// Validate and construct a [`CardName`].
    pub fn new(value: impl Into<String>) -> Result<Self, CardValidationError> {
        let value = value.into();
        match check_char_length(&value, CARD_NAME_MIN, CARD_NAME_MAX) {
            Ok(()) => Ok(Self(value)),
            Err(LengthViolation::TooShort) => {
                Err(CardValidationError::NameTooShort { min: CARD_NAME_MIN })
            }
            Err(LengthViolation::TooLong) => {
                Err(CardValidationError::NameTooLong { max: CARD_NAME_MAX })
            }
        }
    }
}

impl AsRef<str> for CardName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<CardName> for String {
    fn from(value: CardName) -> Self {
        value.0
    }
}

impl TryFrom<String> for CardName {
    type Error = CardValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Absolute `http`/`https` URL the card points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CardLink(String);

impl CardLink {
    /// Validate and construct a [`CardLink`].
    pub fn new(value: impl Into<String>) -> Result<Self, CardValidationError> {
        let value = value.into();
        parse_web_url(&value)
            .map(|_| Self(value))
            .ok_or(CardValidationError::InvalidLink)
    }
}

impl AsRef<str> for CardLink {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<CardLink> for String {
    fn from(value: CardLink) -> Self {
        value.0
    }
}

impl TryFrom<String> for CardLink {
    type Error = CardValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Validated payload for creating a card; the owner comes from the
/// authenticated request, never from the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCard {
    pub name: CardName,
    pub link: CardLink,
}

impl NewCard {
    /// Validate raw inputs.
    pub fn try_from_parts(name: &str, link: &str) -> Result<Self, CardValidationError> {
        Ok(Self {
            name: CardName::new(name)?,
            link: CardLink::new(link)?,
        })
    }
}

/// Posted content card.
///
/// ## Invariants
/// - `liked_by` holds each identity at most once, in the order they liked.
/// - `owner` never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    id: CardId,
    name: CardName,
    link: CardLink,
    #[serde(rename = "ownerId")]
    owner: UserId,
    liked_by: Vec<UserId>,
    created_at: DateTime<Utc>,
}

impl Card {
    /// Assemble a card, dropping repeated likers.
    pub fn new(
        id: CardId,
        new_card: NewCard,
        owner: UserId,
        liked_by: impl IntoIterator<Item = UserId>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let NewCard { name, link } = new_card;
        let mut card = Self {
            id,
            name,
            link,
            owner,
            liked_by: Vec::new(),
            created_at,
        };
        for user in liked_by {
            card.add_like(user);
        }
        card
    }

    /// Stable identifier.
    pub fn id(&self) -> &CardId {
        &self.id
    }

    /// Card title.
    pub fn name(&self) -> &CardName {
        &self.name
    }

    /// Linked URL.
    pub fn link(&self) -> &CardLink {
        &self.link
    }

    /// Identity that created the card.
    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    /// Identities that like the card.
    pub fn liked_by(&self) -> &[UserId] {
        &self.liked_by
    }

    /// Creation instant.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether `user` created this card.
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.owner == user
    }

    /// Add `user` to the like set; repeated likes change nothing.
    pub fn add_like(&mut self, user: UserId) {
        if !self.liked_by.contains(&user) {
            self.liked_by.push(user);
        }
    }

    /// Remove `user` from the like set; absent users change nothing.
    pub fn remove_like(&mut self, user: &UserId) {
        self.liked_by.retain(|liker| liker != user);
    }
}
