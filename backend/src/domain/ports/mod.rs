//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`PasswordHasher`], [`TokenService`]) are
//! implemented by outbound adapters. Driving ports (`*Query`, `*Command`,
//! `*Service`) are implemented by domain services and called by inbound
//! adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod card_repository;
mod cards_command;
mod cards_query;
mod login_service;
mod password_hasher;
mod registration_service;
mod token_service;
mod user_profile_command;
mod user_repository;
mod users_query;

#[cfg(test)]
pub use card_repository::MockCardRepository;
pub use card_repository::{CardPersistenceError, CardRepository};
#[cfg(test)]
pub use cards_command::MockCardsCommand;
pub use cards_command::CardsCommand;
#[cfg(test)]
pub use cards_query::MockCardsQuery;
pub use cards_query::CardsQuery;
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use registration_service::MockRegistrationService;
pub use registration_service::RegistrationService;
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{TokenError, TokenService};
#[cfg(test)]
pub use user_profile_command::MockUserProfileCommand;
pub use user_profile_command::UserProfileCommand;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
