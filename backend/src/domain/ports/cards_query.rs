//! Driving port for reading cards.

use async_trait::async_trait;

use crate::domain::{Card, CardId, Error};

/// Domain use-case port for card reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CardsQuery: Send + Sync {
    /// Return every card.
    async fn list_cards(&self) -> Result<Vec<Card>, Error>;

    /// Return one card or a `not_found` error.
    async fn find_card(&self, id: &CardId) -> Result<Card, Error>;
}
