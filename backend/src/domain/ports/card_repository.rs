//! Port abstraction for card persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Card, CardId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by card repository adapters.
    pub enum CardPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "card repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "card repository query failed: {message}",
    }
}

/// Card Store port.
///
/// Like-set mutations are single atomic statements in the adapter; the
/// returned card reflects the state after the mutation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CardRepository: Send + Sync {
    /// Return every card, newest first.
    async fn list(&self) -> Result<Vec<Card>, CardPersistenceError>;

    /// Persist a freshly created card.
    async fn insert(&self, card: &Card) -> Result<(), CardPersistenceError>;

    /// Fetch a card by identifier.
    async fn find_by_id(&self, id: &CardId) -> Result<Option<Card>, CardPersistenceError>;

    /// Delete the card only if `owner` still owns it.
    ///
    /// Returns the deleted card, or `None` when no matching row remained.
    async fn delete_owned(
        &self,
        id: &CardId,
        owner: &UserId,
    ) -> Result<Option<Card>, CardPersistenceError>;

    /// Add `user` to the like set; `None` when the card does not exist.
    async fn add_like(
        &self,
        id: &CardId,
        user: &UserId,
    ) -> Result<Option<Card>, CardPersistenceError>;

    /// Remove `user` from the like set; `None` when the card does not exist.
    async fn remove_like(
        &self,
        id: &CardId,
        user: &UserId,
    ) -> Result<Option<Card>, CardPersistenceError>;
}
