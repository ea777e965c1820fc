//! PostgreSQL-backed `CardRepository` implementation using Diesel ORM.
//!
//! Likes live in `card_likes` keyed by `(card_id, user_id)`, so liking is an
//! `INSERT .. ON CONFLICT DO NOTHING` and unliking a plain `DELETE`; neither
//! needs a read-modify-write cycle.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{CardPersistenceError, CardRepository};
use crate::domain::{Card, CardId, CardValidationError, NewCard, UserId};

use super::diesel_error_mapping::{StoreFailure, classify_diesel_error, classify_pool_error};
use super::models::{CardRow, NewCardLikeRow, NewCardRow};
use super::pool::{DbPool, PoolError};
use super::schema::{card_likes, cards};

/// Diesel-backed implementation of the `CardRepository` port.
#[derive(Clone)]
pub struct DieselCardRepository {
    pool: DbPool,
}

impl DieselCardRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_failure(failure: StoreFailure) -> CardPersistenceError {
    match failure {
        StoreFailure::Connection(message) => CardPersistenceError::connection(message),
        StoreFailure::Query(message) => CardPersistenceError::query(message),
        StoreFailure::UniqueViolation { constraint }
        | StoreFailure::ForeignKeyViolation { constraint } => CardPersistenceError::query(format!(
            "constraint violated: {}",
            constraint.as_deref().unwrap_or("unknown")
        )),
    }
}

fn map_diesel_error(error: diesel::result::Error) -> CardPersistenceError {
    map_failure(classify_diesel_error(error))
}

fn map_pool_error(error: PoolError) -> CardPersistenceError {
    map_failure(classify_pool_error(error))
}

/// Convert a card row and its likers to a domain card.
fn row_to_card(row: CardRow, likers: Vec<Uuid>) -> Result<Card, CardPersistenceError> {
    let CardRow {
        id,
        name,
        link,
        owner_id,
        created_at,
    } = row;
    let new_card = NewCard::try_from_parts(&name, &link).map_err(|err: CardValidationError| {
        warn!(card_id = %id, error = %err, "stored card row failed validation");
        CardPersistenceError::query(format!("stored card {id} is invalid: {err}"))
    })?;
    Ok(Card::new(
        CardId::from_uuid(id),
        new_card,
        UserId::from_uuid(owner_id),
        likers.into_iter().map(UserId::from_uuid),
        created_at,
    ))
}

/// Load likers for `card_ids`, grouped by card in the order they liked.
async fn load_likers(
    conn: &mut AsyncPgConnection,
    card_ids: &[Uuid],
) -> Result<HashMap<Uuid, Vec<Uuid>>, diesel::result::Error> {
    let pairs: Vec<(Uuid, Uuid)> = card_likes::table
        .filter(card_likes::card_id.eq_any(card_ids))
        .order((card_likes::liked_at.asc(), card_likes::user_id.asc()))
        .select((card_likes::card_id, card_likes::user_id))
        .load(conn)
        .await?;

    let mut grouped: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for (card_id, user_id) in pairs {
        grouped.entry(card_id).or_default().push(user_id);
    }
    Ok(grouped)
}

/// Read one card with its likers.
async fn load_card(
    conn: &mut AsyncPgConnection,
    id: Uuid,
) -> Result<Option<(CardRow, Vec<Uuid>)>, diesel::result::Error> {
    let row: Option<CardRow> = cards::table
        .filter(cards::id.eq(id))
        .select(CardRow::as_select())
        .first(conn)
        .await
        .optional()?;
    let Some(row) = row else {
        return Ok(None);
    };
    let mut likers = load_likers(conn, &[id]).await?;
    let card_likers = likers.remove(&id).unwrap_or_default();
    Ok(Some((row, card_likers)))
}

impl DieselCardRepository {
    /// Run a like-set mutation and re-read the card in one transaction.
    ///
    /// The card row is locked first so a concurrent delete cannot slip in
    /// between the mutation and the read.
    async fn mutate_likes(
        &self,
        id: &CardId,
        user: &UserId,
        like: bool,
    ) -> Result<Option<Card>, CardPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let card_id = *id.as_uuid();
        let user_id = *user.as_uuid();

        let loaded = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let locked: Option<Uuid> = cards::table
                        .filter(cards::id.eq(card_id))
                        .select(cards::id)
                        .for_update()
                        .first(conn)
                        .await
                        .optional()?;
                    if locked.is_none() {
                        return Ok(None);
                    }

                    if like {
                        diesel::insert_into(card_likes::table)
                            .values(NewCardLikeRow { card_id, user_id })
                            .on_conflict((card_likes::card_id, card_likes::user_id))
                            .do_nothing()
                            .execute(conn)
                            .await?;
                    } else {
                        diesel::delete(
                            card_likes::table
                                .filter(card_likes::card_id.eq(card_id))
                                .filter(card_likes::user_id.eq(user_id)),
                        )
                        .execute(conn)
                        .await?;
                    }

                    load_card(conn, card_id).await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        loaded
            .map(|(row, likers)| row_to_card(row, likers))
            .transpose()
    }
}

#[async_trait]
impl CardRepository for DieselCardRepository {
    async fn list(&self) -> Result<Vec<Card>, CardPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CardRow> = cards::table
            .order((cards::created_at.desc(), cards::id.asc()))
            .select(CardRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let mut likers = load_likers(&mut conn, &ids)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(|row| {
                let card_likers = likers.remove(&row.id).unwrap_or_default();
                row_to_card(row, card_likers)
            })
            .collect()
    }

    async fn insert(&self, card: &Card) -> Result<(), CardPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewCardRow {
            id: *card.id().as_uuid(),
            name: card.name().as_ref(),
            link: card.link().as_ref(),
            owner_id: *card.owner().as_uuid(),
            created_at: card.created_at(),
        };

        diesel::insert_into(cards::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &CardId) -> Result<Option<Card>, CardPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let loaded = load_card(&mut conn, *id.as_uuid())
            .await
            .map_err(map_diesel_error)?;

        loaded
            .map(|(row, likers)| row_to_card(row, likers))
            .transpose()
    }

    async fn delete_owned(
        &self,
        id: &CardId,
        owner: &UserId,
    ) -> Result<Option<Card>, CardPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let card_id = *id.as_uuid();
        let owner_id = *owner.as_uuid();

        let deleted = conn
            .transaction(|conn| {
                async move {
                    let mut likers = load_likers(conn, &[card_id]).await?;
                    let row: Option<CardRow> = diesel::delete(
                        cards::table
                            .filter(cards::id.eq(card_id))
                            .filter(cards::owner_id.eq(owner_id)),
                    )
                    .returning(CardRow::as_returning())
                    .get_result(conn)
                    .await
                    .optional()?;
                    Ok::<_, diesel::result::Error>(
                        row.map(|row| (row, likers.remove(&card_id).unwrap_or_default())),
                    )
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        deleted
            .map(|(row, likers)| row_to_card(row, likers))
            .transpose()
    }

    async fn add_like(
        &self,
        id: &CardId,
        user: &UserId,
    ) -> Result<Option<Card>, CardPersistenceError> {
        self.mutate_likes(id, user, true).await
    }

    async fn remove_like(
        &self,
        id: &CardId,
        user: &UserId,
    ) -> Result<Option<Card>, CardPersistenceError> {
        self.mutate_likes(id, user, false).await
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for row conversion and error mapping.
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    fn row(link: &str) -> CardRow {
        CardRow {
            id: Uuid::new_v4(),
            name: "Beach".to_owned(),
            link: link.to_owned(),
            owner_id: Uuid::new_v4(),
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn rows_convert_with_likers_in_order() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        let card = row_to_card(row("https://x.test/e.jpg"), vec![first, second, first])
            .expect("valid row");

        assert_eq!(
            card.liked_by(),
            &[UserId::from_uuid(first), UserId::from_uuid(second)]
        );
    }

    #[rstest]
    fn invalid_rows_are_query_errors() {
        let err = row_to_card(row("not a url"), Vec::new()).expect_err("bad link");
        assert!(matches!(err, CardPersistenceError::Query { .. }));
    }

    #[rstest]
    fn constraint_failures_are_query_errors() {
        let failure = StoreFailure::ForeignKeyViolation {
            constraint: Some("card_likes_card_id_fkey".to_owned()),
        };
        assert!(matches!(map_failure(failure), CardPersistenceError::Query { .. }));
    }

    #[rstest]
    fn pool_failures_are_connection_errors() {
        assert_eq!(
            map_pool_error(PoolError::checkout("timed out")),
            CardPersistenceError::connection("timed out")
        );
    }
}
