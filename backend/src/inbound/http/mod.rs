//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod cards;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every API route on `cfg`.
///
/// `/users/me` is registered before `/users/{userId}` so the literal segment
/// wins.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use mesto::inbound::http::configure_api;
///
/// let app = App::new().configure(configure_api);
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(users::signup)
        .service(users::signin)
        .service(users::list_users)
        .service(users::current_user)
        .service(users::update_profile)
        .service(users::update_avatar)
        .service(users::get_user)
        .service(cards::list_cards)
        .service(cards::create_card)
        .service(cards::get_card)
        .service(cards::delete_card)
        .service(cards::like_card)
        .service(cards::unlike_card);
}
