//! Account services: signup, login, profile reads and profile edits.
//!
//! This module implements the user-facing driving ports on top of the
//! Credential Store, the password hasher and the token issuer.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::failure::{INVALID_CREDENTIALS_MESSAGE, USER_NOT_FOUND_MESSAGE};
use crate::domain::ports::{
    LoginService, PasswordHasher, RegistrationService, TokenService, UserProfileCommand,
    UserRepository, UsersQuery,
};
use crate::domain::{
    AuthContext, AvatarUrl, Error, LoginCredentials, ProfileUpdate, Registration, SignIn, User,
    UserId,
};

/// Account service implementing the user driving ports.
#[derive(Clone)]
pub struct UserAccountService<R, H, T> {
    users: Arc<R>,
    hasher: Arc<H>,
    tokens: Arc<T>,
}

impl<R, H, T> UserAccountService<R, H, T> {
    /// Create a new service over the given adapters.
    pub fn new(users: Arc<R>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }
}

fn user_not_found(id: &UserId) -> Error {
    Error::not_found(USER_NOT_FOUND_MESSAGE).with_details(json!({ "userId": id.to_string() }))
}

fn rejected_login() -> Error {
    Error::unauthorized(INVALID_CREDENTIALS_MESSAGE)
}

#[async_trait]
impl<R, H, T> RegistrationService for UserAccountService<R, H, T>
where
    R: UserRepository,
    H: PasswordHasher,
    T: Send + Sync,
{
    async fn register(&self, registration: Registration) -> Result<User, Error> {
        let Registration {
            email,
            password,
            profile,
        } = registration;
        let password_hash = self.hasher.hash(&password).await?;
        let user = User::new(UserId::random(), profile, email);
        self.users.insert(&user, &password_hash).await?;
        info!(user_id = %user.id(), "account registered");
        Ok(user)
    }
}

#[async_trait]
impl<R, H, T> LoginService for UserAccountService<R, H, T>
where
    R: UserRepository,
    H: PasswordHasher,
    T: TokenService,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<SignIn, Error> {
        let Some(stored) = self
            .users
            .find_credentials_by_email(credentials.email())
            .await?
        else {
            warn!("login rejected: unknown email");
            return Err(rejected_login());
        };

        let matches = self
            .hasher
            .verify(credentials.password(), &stored.password_hash)
            .await?;
        if !matches {
            warn!(user_id = %stored.user.id(), "login rejected: password mismatch");
            return Err(rejected_login());
        }

        let token = self.tokens.issue(stored.user.id())?;
        info!(user_id = %stored.user.id(), "login succeeded");
        Ok(SignIn {
            token,
            user: stored.user,
        })
    }
}

#[async_trait]
impl<R, H, T> UsersQuery for UserAccountService<R, H, T>
where
    R: UserRepository,
    H: Send + Sync,
    T: Send + Sync,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        Ok(self.users.list().await?)
    }

    async fn find_user(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| user_not_found(id))
    }
}

#[async_trait]
impl<R, H, T> UserProfileCommand for UserAccountService<R, H, T>
where
    R: UserRepository,
    H: Send + Sync,
    T: Send + Sync,
{
    async fn update_profile(
        &self,
        auth: &AuthContext,
        update: &ProfileUpdate,
    ) -> Result<User, Error> {
        let subject = auth.subject_id();
        self.users
            .update_profile(subject, update)
            .await?
            .ok_or_else(|| user_not_found(subject))
    }

    async fn update_avatar(&self, auth: &AuthContext, avatar: &AvatarUrl) -> Result<User, Error> {
        let subject = auth.subject_id();
        self.users
            .update_avatar(subject, avatar)
            .await?
            .ok_or_else(|| user_not_found(subject))
    }
}

#[cfg(test)]
#[path = "user_account_service_tests.rs"]
mod tests;
