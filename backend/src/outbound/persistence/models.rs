//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions back into domain types
//! re-run validation, so a row that no longer satisfies the domain rules
//! surfaces as a query failure rather than a panic.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{card_likes, cards, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub about: String,
    pub avatar: String,
    pub email: String,
}

/// User row joined with its password hash, read only at login.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CredentialsRow {
    #[diesel(embed)]
    pub user: UserRow,
    pub password_hash: String,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub about: &'a str,
    pub avatar: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

/// Changeset for partial profile updates; `None` columns are left alone.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct ProfileChangeset<'a> {
    pub name: Option<&'a str>,
    pub about: Option<&'a str>,
    pub avatar: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the cards table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = cards)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CardRow {
    pub id: Uuid,
    pub name: String,
    pub link: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new card records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = cards)]
pub(crate) struct NewCardRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub link: &'a str,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Insertable like-set membership.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = card_likes)]
pub(crate) struct NewCardLikeRow {
    pub card_id: Uuid,
    pub user_id: Uuid,
}
