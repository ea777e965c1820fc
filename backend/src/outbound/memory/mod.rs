//! In-process adapters for the Credential Store and Card Store ports.
//!
//! Used when no database URL is configured and by the HTTP test suites.
//! Each store keeps its state behind one mutex, so every port call is atomic
//! with respect to the others, mirroring the single-statement guarantees of
//! the PostgreSQL adapters.

mod card_repository;
mod user_repository;

pub use card_repository::InMemoryCardRepository;
pub use user_repository::InMemoryUserRepository;

/// Message reported when a previous holder panicked while holding the lock.
const POISONED: &str = "in-memory store lock poisoned";
