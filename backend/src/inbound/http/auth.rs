//! Bearer authentication extractor.
//!
//! Handlers that take [`Authenticated`] never run for requests without a
//! verified credential; the subject id it carries is the only identity a
//! handler may act on.

use std::future::{Ready, ready};

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};

use crate::domain::{AuthContext, Error, UserId};

use super::state::HttpState;

/// Verified identity of the caller.
#[derive(Debug, Clone)]
pub struct Authenticated(AuthContext);

impl Authenticated {
    /// Authentication context for domain services.
    pub fn context(&self) -> &AuthContext {
        &self.0
    }

    /// Identifier of the authenticated user.
    pub fn subject_id(&self) -> &UserId {
        self.0.subject_id()
    }
}

fn authenticate(req: &HttpRequest) -> Result<Authenticated, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not registered"))?;
    // A header that is not valid UTF-8 counts as absent.
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    state.authenticator.authenticate(header).map(Authenticated)
}

impl FromRequest for Authenticated {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
