//! Ownership checks for destructive operations on existing resources.

use tracing::warn;

use super::auth::AuthContext;
use super::card::Card;
use super::error::Error;
use super::failure::NOT_CARD_OWNER_MESSAGE;

/// Confirm the authenticated subject created `card`.
///
/// Callers must have loaded the card first: existence is checked before
/// ownership, so a missing card is `not_found` and never `forbidden`.
pub fn ensure_card_owner(auth: &AuthContext, card: &Card) -> Result<(), Error> {
    if card.is_owned_by(auth.subject_id()) {
        return Ok(());
    }
    warn!(
        card_id = %card.id(),
        owner_id = %card.owner(),
        subject_id = %auth.subject_id(),
        "refusing to delete card owned by another user"
    );
    Err(Error::forbidden(NOT_CARD_OWNER_MESSAGE))
}
