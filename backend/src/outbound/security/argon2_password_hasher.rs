//! Argon2id implementation of the `PasswordHasher` port.
//!
//! Hashing is CPU-bound, so both operations run on the blocking pool. Stored
//! hashes use the PHC string format, which embeds the salt and parameters.

use argon2::password_hash::{
    PasswordHash as PhcHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;
use rand::rngs::OsRng;
use tracing::debug;
use zeroize::Zeroizing;

use crate::domain::ports::{PasswordHashError, PasswordHasher};
use crate::domain::{Password, PasswordHash};

/// Argon2id hasher.
///
/// New hashes use the configured cost parameters; verification reads the
/// parameters embedded in the stored hash.
#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Argon2PasswordHasher {
    /// Hasher with explicit cost parameters.
    ///
    /// # Examples
    /// ```
    /// use argon2::Params;
    /// use mesto::outbound::security::Argon2PasswordHasher;
    ///
    /// let params = Params::new(8, 1, 1, None).expect("valid parameters");
    /// let _hasher = Argon2PasswordHasher::with_params(params);
    /// ```
    pub fn with_params(params: Params) -> Self {
        Self { params }
    }
}

fn hash_blocking(secret: &[u8], params: Params) -> Result<PasswordHash, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password(secret, &salt)
        .map(|hash| PasswordHash::new(hash.to_string()))
        .map_err(|err| PasswordHashError::hash(err.to_string()))
}

fn verify_blocking(secret: &[u8], encoded: &str) -> Result<bool, PasswordHashError> {
    let parsed =
        PhcHash::new(encoded).map_err(|err| PasswordHashError::malformed_hash(err.to_string()))?;
    match Argon2::default().verify_password(secret, &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(err) => Err(PasswordHashError::malformed_hash(err.to_string())),
    }
}

fn task_failed(err: tokio::task::JoinError) -> PasswordHashError {
    PasswordHashError::hash(format!("hashing task failed: {err}"))
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHashError> {
        let secret = Zeroizing::new(password.expose().as_bytes().to_vec());
        let params = self.params.clone();
        tokio::task::spawn_blocking(move || hash_blocking(&secret, params))
            .await
            .map_err(task_failed)?
    }

    async fn verify(
        &self,
        password: &Password,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        let secret = Zeroizing::new(password.expose().as_bytes().to_vec());
        let encoded = hash.as_str().to_owned();
        let matched = tokio::task::spawn_blocking(move || verify_blocking(&secret, &encoded))
            .await
            .map_err(task_failed)??;
        if !matched {
            debug!("password verification mismatch");
        }
        Ok(matched)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn password() -> Password {
        Password::new("correct horse").expect("valid password")
    }

    #[fixture]
    fn hasher() -> Argon2PasswordHasher {
        Argon2PasswordHasher::with_params(Params::new(8, 1, 1, None).expect("valid parameters"))
    }

    #[rstest]
    #[tokio::test]
    async fn hash_verifies_the_hashed_password(password: Password, hasher: Argon2PasswordHasher) {
        let hash = hasher.hash(&password).await.expect("hash");

        assert!(hash.as_str().starts_with("$argon2id$"));
        assert!(hasher.verify(&password, &hash).await.expect("verify"));
    }

    #[rstest]
    #[tokio::test]
    async fn wrong_password_is_a_mismatch_not_an_error(
        password: Password,
        hasher: Argon2PasswordHasher,
    ) {
        let hash = hasher.hash(&password).await.expect("hash");
        let other = Password::new("battery staple").expect("valid password");

        assert!(!hasher.verify(&other, &hash).await.expect("verify"));
    }

    #[rstest]
    #[tokio::test]
    async fn salts_differ_between_hashes(password: Password, hasher: Argon2PasswordHasher) {
        let first = hasher.hash(&password).await.expect("hash");
        let second = hasher.hash(&password).await.expect("hash");

        assert_ne!(first.as_str(), second.as_str());
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_stored_hash_is_reported(password: Password, hasher: Argon2PasswordHasher) {
        let err = hasher
            .verify(&password, &PasswordHash::new("plaintext"))
            .await
            .expect_err("malformed");

        assert!(matches!(err, PasswordHashError::MalformedHash { .. }));
    }
}
