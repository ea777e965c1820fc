//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use argon2::Params;
use chrono::Duration;
use mockable::DefaultClock;

use crate::domain::ports::TokenService;
use crate::domain::{Authenticator, BEARER_PREFIX, CardService, UserAccountService, UserId};
use crate::inbound::http::error::route_not_found;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::inbound::http::{configure_api, validation::json_config};
use crate::outbound::memory::{InMemoryCardRepository, InMemoryUserRepository};
use crate::outbound::security::{Argon2PasswordHasher, JwtTokenService, SigningContext};

const TEST_SECRET: &[u8] = b"test-signing-secret-of-32-bytes!";

/// Fully wired HTTP state over fresh in-memory stores.
///
/// Uses the real hasher with minimal cost parameters and a fixed signing
/// secret so tests can mint tokens for arbitrary subjects.
pub struct TestHarness {
    state: web::Data<HttpState>,
    tokens: Arc<JwtTokenService>,
}

impl TestHarness {
    pub fn new() -> Self {
        let tokens = Arc::new(JwtTokenService::new(
            Arc::new(SigningContext::from_secret(TEST_SECRET, Duration::days(7))),
            Arc::new(DefaultClock),
        ));
        let params = Params::new(8, 1, 1, None).expect("valid argon2 parameters");
        let accounts = Arc::new(UserAccountService::new(
            Arc::new(InMemoryUserRepository::default()),
            Arc::new(Argon2PasswordHasher::with_params(params)),
            tokens.clone(),
        ));
        let cards = Arc::new(CardService::new(
            Arc::new(InMemoryCardRepository::default()),
            Arc::new(DefaultClock),
        ));
        let ports = HttpStatePorts {
            registration: accounts.clone(),
            login: accounts.clone(),
            users: accounts.clone(),
            profile: accounts,
            cards: cards.clone(),
            cards_command: cards,
        };
        let state = HttpState::new(ports, Authenticator::new(tokens.clone()));
        Self {
            state: web::Data::new(state),
            tokens,
        }
    }

    pub fn state(&self) -> web::Data<HttpState> {
        self.state.clone()
    }

    /// `Authorization` header value naming `subject`.
    pub fn bearer_for(&self, subject: &UserId) -> String {
        let token = self.tokens.issue(subject).expect("token issued");
        format!("{BEARER_PREFIX}{}", token.as_str())
    }

    /// Application with every API route, the JSON error handler and the
    /// not-found fallback.
    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        App::new()
            .app_data(self.state())
            .app_data(json_config())
            .configure(configure_api)
            .default_service(web::to(route_not_found))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the harness itself.
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;

    #[actix_web::test]
    async fn app_outlives_the_harness_that_built_it() {
        let app = {
            let harness = TestHarness::new();
            harness.app()
        };
        let service = actix_test::init_service(app).await;

        let response = actix_test::call_service(
            &service,
            actix_test::TestRequest::get().uri("/no/such/route").to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
