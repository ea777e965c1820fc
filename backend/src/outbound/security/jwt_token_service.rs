//! HS256 implementation of the `TokenService` port.
//!
//! Tokens carry `sub` (user id), `iat` and `exp` in seconds. Expiry is
//! checked against the injected clock rather than the system time so the
//! boundary is testable; a token is expired once `now >= exp`.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use crate::domain::ports::{TokenError, TokenService};
use crate::domain::{AccessToken, UserId, VerifiedCredential};

/// Shortest accepted signing secret, in bytes.
pub const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// Key material and lifetime shared by every handler.
#[derive(Clone)]
pub struct SigningContext {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl SigningContext {
    /// Derive HS256 keys from `secret`; tokens live for `ttl`.
    pub fn from_secret(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    /// Token lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl fmt::Debug for SigningContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningContext")
            .field("keys", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// Token adapter backed by `jsonwebtoken`.
#[derive(Clone)]
pub struct JwtTokenService {
    context: Arc<SigningContext>,
    clock: Arc<dyn Clock>,
}

impl JwtTokenService {
    /// Create a service over shared keys and a clock.
    pub fn new(context: Arc<SigningContext>, clock: Arc<dyn Clock>) -> Self {
        Self { context, clock }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation
    }
}

fn map_decode_error(err: jsonwebtoken::errors::Error) -> TokenError {
    match err.kind() {
        ErrorKind::InvalidSignature => TokenError::invalid_signature(),
        ErrorKind::ExpiredSignature => TokenError::expired(),
        _ => TokenError::malformed(err.to_string()),
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, subject: &UserId) -> Result<AccessToken, TokenError> {
        let now = self.clock.utc();
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + self.context.ttl).timestamp(),
        };
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.context.encoding,
        )
        .map(AccessToken::new)
        .map_err(|err| TokenError::signing(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<VerifiedCredential, TokenError> {
        let data =
            jsonwebtoken::decode::<Claims>(token, &self.context.decoding, &Self::validation())
                .map_err(map_decode_error)?;
        let claims = data.claims;
        if self.clock.utc().timestamp() >= claims.exp {
            return Err(TokenError::expired());
        }
        let expires_at = DateTime::from_timestamp(claims.exp, 0)
            .ok_or_else(|| TokenError::malformed("exp out of range"))?;
        let subject =
            UserId::new(&claims.sub).map_err(|_| TokenError::invalid_subject(claims.sub.clone()))?;
        Ok(VerifiedCredential::new(subject, expires_at))
    }
}
