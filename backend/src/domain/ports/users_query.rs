//! Driving port for user-facing profile queries.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for reading profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return every profile.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// Return one profile or a `not_found` error.
    async fn find_user(&self, id: &UserId) -> Result<User, Error>;
}
