//! Driving port for card mutations.
//!
//! Deletion is ownership-gated; likes are open to every authenticated user
//! and idempotent.

use async_trait::async_trait;

use crate::domain::{AuthContext, Card, CardId, Error, NewCard};

/// Domain use-case port for card mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CardsCommand: Send + Sync {
    /// Create a card owned by the caller.
    async fn create_card(&self, auth: &AuthContext, card: NewCard) -> Result<Card, Error>;

    /// Delete a card the caller owns and return it.
    async fn delete_card(&self, auth: &AuthContext, id: &CardId) -> Result<Card, Error>;

    /// Add the caller to the card's like set.
    async fn like_card(&self, auth: &AuthContext, id: &CardId) -> Result<Card, Error>;

    /// Remove the caller from the card's like set.
    async fn unlike_card(&self, auth: &AuthContext, id: &CardId) -> Result<Card, Error>;
}
