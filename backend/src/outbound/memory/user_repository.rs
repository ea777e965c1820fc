//! In-memory `UserRepository`.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{
    AvatarUrl, Email, PasswordHash, ProfileUpdate, StoredCredentials, User, UserId,
};

use super::POISONED;

/// Users kept in insertion order.
#[derive(Default)]
pub struct InMemoryUserRepository {
    records: Mutex<Vec<StoredCredentials>>,
}

impl InMemoryUserRepository {
    fn with_records<R>(
        &self,
        f: impl FnOnce(&mut Vec<StoredCredentials>) -> R,
    ) -> Result<R, UserPersistenceError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| UserPersistenceError::query(POISONED))?;
        Ok(f(&mut records))
    }

    fn modify(
        &self,
        id: &UserId,
        change: impl FnOnce(&User) -> User,
    ) -> Result<Option<User>, UserPersistenceError> {
        self.with_records(|records| {
            let record = records.iter_mut().find(|record| record.user.id() == id)?;
            record.user = change(&record.user);
            Some(record.user.clone())
        })
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(
        &self,
        user: &User,
        password_hash: &PasswordHash,
    ) -> Result<(), UserPersistenceError> {
        self.with_records(|records| {
            if records
                .iter()
                .any(|record| record.user.email() == user.email())
            {
                return Err(UserPersistenceError::duplicate_email(user.email().to_string()));
            }
            records.push(StoredCredentials {
                user: user.clone(),
                password_hash: password_hash.clone(),
            });
            Ok(())
        })?
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        self.with_records(|records| {
            records
                .iter()
                .find(|record| record.user.id() == id)
                .map(|record| record.user.clone())
        })
    }

    async fn find_credentials_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        self.with_records(|records| {
            records
                .iter()
                .find(|record| record.user.email() == email)
                .cloned()
        })
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        self.with_records(|records| records.iter().map(|record| record.user.clone()).collect())
    }

    async fn update_profile(
        &self,
        id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<Option<User>, UserPersistenceError> {
        self.modify(id, |user| user.with_update(update))
    }

    async fn update_avatar(
        &self,
        id: &UserId,
        avatar: &AvatarUrl,
    ) -> Result<Option<User>, UserPersistenceError> {
        self.modify(id, |user| user.with_avatar(avatar.clone()))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::Profile;
    use rstest::{fixture, rstest};

    fn user(email: &str) -> User {
        User::new(
            UserId::random(),
            Profile::default(),
            Email::new(email).expect("valid email"),
        )
    }

    #[fixture]
    fn hash() -> PasswordHash {
        PasswordHash::new("$argon2id$test")
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_email_is_rejected(hash: PasswordHash) {
        let repo = InMemoryUserRepository::default();
        repo.insert(&user("a@b.com"), &hash).await.expect("first insert");

        let err = repo
            .insert(&user("A@B.com"), &hash)
            .await
            .expect_err("duplicate");

        assert_eq!(err, UserPersistenceError::duplicate_email("a@b.com"));
        assert_eq!(repo.list().await.expect("list").len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn credentials_are_found_by_email(hash: PasswordHash) {
        let repo = InMemoryUserRepository::default();
        let stored = user("a@b.com");
        repo.insert(&stored, &hash).await.expect("insert");

        let found = repo
            .find_credentials_by_email(stored.email())
            .await
            .expect("lookup")
            .expect("present");

        assert_eq!(found.user, stored);
        assert_eq!(found.password_hash, hash);
    }

    #[rstest]
    #[tokio::test]
    async fn updates_for_unknown_ids_return_none() {
        let repo = InMemoryUserRepository::default();
        let update = ProfileUpdate::try_from_parts(Some("Ada"), None).expect("valid update");

        let result = repo
            .update_profile(&UserId::random(), &update)
            .await
            .expect("no storage failure");

        assert!(result.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn avatar_update_is_persisted(hash: PasswordHash) {
        let repo = InMemoryUserRepository::default();
        let stored = user("a@b.com");
        repo.insert(&stored, &hash).await.expect("insert");
        let avatar = AvatarUrl::new("https://x.test/new.png").expect("valid avatar");

        repo.update_avatar(stored.id(), &avatar)
            .await
            .expect("update")
            .expect("present");

        let reread = repo
            .find_by_id(stored.id())
            .await
            .expect("lookup")
            .expect("present");
        assert_eq!(reread.avatar(), &avatar);
    }
}
