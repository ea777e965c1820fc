//! Card services: listing, creation, owner-gated deletion and likes.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::failure::CARD_NOT_FOUND_MESSAGE;
use crate::domain::ownership::ensure_card_owner;
use crate::domain::ports::{CardRepository, CardsCommand, CardsQuery};
use crate::domain::{AuthContext, Card, CardId, Error, NewCard};

/// Card service implementing the card driving ports.
#[derive(Clone)]
pub struct CardService<R> {
    cards: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> CardService<R> {
    /// Create a new service over the card repository and a clock used to
    /// stamp new cards.
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use mesto::domain::CardService;
    /// # use mesto::outbound::memory::InMemoryCardRepository;
    /// # use mockable::DefaultClock;
    /// let service = CardService::new(
    ///     Arc::new(InMemoryCardRepository::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(cards: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { cards, clock }
    }
}

fn card_not_found(id: &CardId) -> Error {
    Error::not_found(CARD_NOT_FOUND_MESSAGE).with_details(json!({ "cardId": id.to_string() }))
}

#[async_trait]
impl<R> CardsQuery for CardService<R>
where
    R: CardRepository,
{
    async fn list_cards(&self) -> Result<Vec<Card>, Error> {
        Ok(self.cards.list().await?)
    }

    async fn find_card(&self, id: &CardId) -> Result<Card, Error> {
        self.cards
            .find_by_id(id)
            .await?
            .ok_or_else(|| card_not_found(id))
    }
}

#[async_trait]
impl<R> CardsCommand for CardService<R>
where
    R: CardRepository,
{
    async fn create_card(&self, auth: &AuthContext, card: NewCard) -> Result<Card, Error> {
        let card = Card::new(
            CardId::random(),
            card,
            *auth.subject_id(),
            Vec::new(),
            self.clock.utc(),
        );
        self.cards.insert(&card).await?;
        info!(card_id = %card.id(), owner_id = %card.owner(), "card created");
        Ok(card)
    }

    async fn delete_card(&self, auth: &AuthContext, id: &CardId) -> Result<Card, Error> {
        let existing = self
            .cards
            .find_by_id(id)
            .await?
            .ok_or_else(|| card_not_found(id))?;
        ensure_card_owner(auth, &existing)?;

        // A concurrent delete between the read and this call leaves no row.
        let deleted = self
            .cards
            .delete_owned(id, auth.subject_id())
            .await?
            .ok_or_else(|| card_not_found(id))?;
        info!(card_id = %deleted.id(), "card deleted");
        Ok(deleted)
    }

    async fn like_card(&self, auth: &AuthContext, id: &CardId) -> Result<Card, Error> {
        self.cards
            .add_like(id, auth.subject_id())
            .await?
            .ok_or_else(|| card_not_found(id))
    }

    async fn unlike_card(&self, auth: &AuthContext, id: &CardId) -> Result<Card, Error> {
        self.cards
            .remove_like(id, auth.subject_id())
            .await?
            .ok_or_else(|| card_not_found(id))
    }
}

#[cfg(test)]
#[path = "card_service_tests.rs"]
mod tests;
