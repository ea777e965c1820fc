//! In-memory `CardRepository`.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{CardPersistenceError, CardRepository};
use crate::domain::{Card, CardId, UserId};

use super::POISONED;

/// Cards kept in insertion order; listed newest first.
#[derive(Default)]
pub struct InMemoryCardRepository {
    cards: Mutex<Vec<Card>>,
}

impl InMemoryCardRepository {
    fn with_cards<R>(
        &self,
        f: impl FnOnce(&mut Vec<Card>) -> R,
    ) -> Result<R, CardPersistenceError> {
        let mut cards = self
            .cards
            .lock()
            .map_err(|_| CardPersistenceError::query(POISONED))?;
        Ok(f(&mut cards))
    }

    fn modify(
        &self,
        id: &CardId,
        change: impl FnOnce(&mut Card),
    ) -> Result<Option<Card>, CardPersistenceError> {
        self.with_cards(|cards| {
            let card = cards.iter_mut().find(|card| card.id() == id)?;
            change(card);
            Some(card.clone())
        })
    }
}

#[async_trait]
impl CardRepository for InMemoryCardRepository {
    async fn list(&self) -> Result<Vec<Card>, CardPersistenceError> {
        self.with_cards(|cards| cards.iter().rev().cloned().collect())
    }

    async fn insert(&self, card: &Card) -> Result<(), CardPersistenceError> {
        self.with_cards(|cards| cards.push(card.clone()))
    }

    async fn find_by_id(&self, id: &CardId) -> Result<Option<Card>, CardPersistenceError> {
        self.with_cards(|cards| cards.iter().find(|card| card.id() == id).cloned())
    }

    async fn delete_owned(
        &self,
        id: &CardId,
        owner: &UserId,
    ) -> Result<Option<Card>, CardPersistenceError> {
        self.with_cards(|cards| {
            let index = cards
                .iter()
                .position(|card| card.id() == id && card.is_owned_by(owner))?;
            Some(cards.remove(index))
        })
    }

    async fn add_like(
        &self,
        id: &CardId,
        user: &UserId,
    ) -> Result<Option<Card>, CardPersistenceError> {
        self.modify(id, |card| card.add_like(*user))
    }

    async fn remove_like(
        &self,
        id: &CardId,
        user: &UserId,
    ) -> Result<Option<Card>, CardPersistenceError> {
        self.modify(id, |card| card.remove_like(user))
    }
}
