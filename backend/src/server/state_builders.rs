//! Builders for HTTP state ports over the configured storage adapters.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::warn;

use mesto::domain::ports::{CardRepository, TokenService, UserRepository};
use mesto::domain::{Authenticator, CardService, UserAccountService};
use mesto::inbound::http::state::{HttpState, HttpStatePorts};
use mesto::outbound::memory::{InMemoryCardRepository, InMemoryUserRepository};
use mesto::outbound::persistence::{DieselCardRepository, DieselUserRepository};
use mesto::outbound::security::{Argon2PasswordHasher, JwtTokenService};

use super::ServerConfig;

/// Wire account and card services over a user and card repository pair.
fn build_ports<U, C>(
    users: Arc<U>,
    cards: Arc<C>,
    tokens: Arc<JwtTokenService>,
    clock: Arc<dyn Clock>,
) -> HttpStatePorts
where
    U: UserRepository + 'static,
    C: CardRepository + 'static,
{
    let accounts = Arc::new(UserAccountService::new(
        users,
        Arc::new(Argon2PasswordHasher::default()),
        tokens,
    ));
    let card_service = Arc::new(CardService::new(cards, clock));
    HttpStatePorts {
        registration: accounts.clone(),
        login: accounts.clone(),
        users: accounts.clone(),
        profile: accounts,
        cards: card_service.clone(),
        cards_command: card_service,
    }
}

/// Build the shared HTTP state.
///
/// Uses the Diesel repositories when a pool is configured, otherwise falls
/// back to in-process storage that is lost on restart.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let tokens = Arc::new(JwtTokenService::new(config.signing.clone(), clock.clone()));
    let ports = match &config.db_pool {
        Some(pool) => build_ports(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselCardRepository::new(pool.clone())),
            tokens.clone(),
            clock,
        ),
        None => {
            warn!("no database configured; users and cards are kept in memory");
            build_ports(
                Arc::new(InMemoryUserRepository::default()),
                Arc::new(InMemoryCardRepository::default()),
                tokens.clone(),
                clock,
            )
        }
    };
    let verifier: Arc<dyn TokenService> = tokens;
    web::Data::new(HttpState::new(ports, Authenticator::new(verifier)))
}
