//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered identities with their profile and password hash.
    users (id) {
        id -> Uuid,
        name -> Varchar,
        about -> Varchar,
        avatar -> Text,
        /// Lower-cased; unique via `users_email_key`.
        email -> Varchar,
        /// PHC-formatted Argon2id hash.
        password_hash -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Posted cards.
    cards (id) {
        id -> Uuid,
        name -> Varchar,
        link -> Text,
        owner_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Like-set membership; the composite key makes a repeated like a no-op.
    card_likes (card_id, user_id) {
        card_id -> Uuid,
        user_id -> Uuid,
        liked_at -> Timestamptz,
    }
}

diesel::joinable!(card_likes -> cards (card_id));
diesel::allow_tables_to_appear_in_same_query!(users, cards, card_likes);
