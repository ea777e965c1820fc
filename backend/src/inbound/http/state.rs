//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::Authenticator;
use crate::domain::ports::{
    CardsCommand, CardsQuery, LoginService, RegistrationService, UserProfileCommand, UsersQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub registration: Arc<dyn RegistrationService>,
    pub login: Arc<dyn LoginService>,
    pub users: Arc<dyn UsersQuery>,
    pub profile: Arc<dyn UserProfileCommand>,
    pub cards: Arc<dyn CardsQuery>,
    pub cards_command: Arc<dyn CardsCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub registration: Arc<dyn RegistrationService>,
    pub login: Arc<dyn LoginService>,
    pub users: Arc<dyn UsersQuery>,
    pub profile: Arc<dyn UserProfileCommand>,
    pub cards: Arc<dyn CardsQuery>,
    pub cards_command: Arc<dyn CardsCommand>,
    pub authenticator: Authenticator,
}

impl HttpState {
    /// Construct state from the ports bundle and the bearer authenticator.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use chrono::Duration;
    /// use mesto::domain::{Authenticator, CardService, UserAccountService};
    /// use mesto::inbound::http::state::{HttpState, HttpStatePorts};
    /// use mesto::outbound::memory::{InMemoryCardRepository, InMemoryUserRepository};
    /// use mesto::outbound::security::{Argon2PasswordHasher, JwtTokenService, SigningContext};
    /// use mockable::DefaultClock;
    ///
    /// let tokens = Arc::new(JwtTokenService::new(
    ///     Arc::new(SigningContext::from_secret(&[7; 32], Duration::days(7))),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let accounts = Arc::new(UserAccountService::new(
    ///     Arc::new(InMemoryUserRepository::default()),
    ///     Arc::new(Argon2PasswordHasher::default()),
    ///     tokens.clone(),
    /// ));
    /// let cards = Arc::new(CardService::new(
    ///     Arc::new(InMemoryCardRepository::default()),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let ports = HttpStatePorts {
    ///     registration: accounts.clone(),
    ///     login: accounts.clone(),
    ///     users: accounts.clone(),
    ///     profile: accounts,
    ///     cards: cards.clone(),
    ///     cards_command: cards,
    /// };
    /// let state = HttpState::new(ports, Authenticator::new(tokens));
    /// let _login = state.login.clone();
    /// ```
    pub fn new(ports: HttpStatePorts, authenticator: Authenticator) -> Self {
        let HttpStatePorts {
            registration,
            login,
            users,
            profile,
            cards,
            cards_command,
        } = ports;
        Self {
            registration,
            login,
            users,
            profile,
            cards,
            cards_command,
            authenticator,
        }
    }
}
