//! Field-level constraint checks shared by the domain value types.
//!
//! Each helper answers a single question about a raw string so the value
//! types in [`crate::domain::user`] and [`crate::domain::card`] can report
//! their own field-specific validation errors.

use std::sync::OnceLock;

use regex::Regex;
use url::Url;
use uuid::Uuid;

/// Length of a canonical hyphenated UUID, the storage identifier format.
pub const RESOURCE_ID_LEN: usize = 36;

/// A field failed validation; adapters use the field and code to build
/// client-facing error details.
pub trait FieldViolation: std::error::Error {
    /// Name of the offending request field as clients see it.
    fn field(&self) -> &'static str;

    /// Stable snake_case code describing the violation.
    fn code(&self) -> &'static str;
}

/// Outcome of a character-count check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LengthViolation {
    TooShort,
    TooLong,
}

/// Check that `value` has between `min` and `max` characters (inclusive).
pub(crate) fn check_char_length(value: &str, min: usize, max: usize) -> Result<(), LengthViolation> {
    let length = value.chars().count();
    if length < min {
        return Err(LengthViolation::TooShort);
    }
    if length > max {
        return Err(LengthViolation::TooLong);
    }
    Ok(())
}

/// Parse an absolute `http`/`https` URL with a host.
pub(crate) fn parse_web_url(value: &str) -> Option<Url> {
    if value.trim() != value || value.is_empty() {
        return None;
    }
    let url = Url::parse(value).ok()?;
    let web_scheme = matches!(url.scheme(), "http" | "https");
    let has_host = url.host_str().is_some_and(|host| !host.is_empty());
    (web_scheme && has_host).then_some(url)
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Whether `value` looks like a deliverable email address.
pub(crate) fn is_email(value: &str) -> bool {
    email_regex().is_match(value)
}

/// Parse a storage identifier in canonical hyphenated form.
///
/// Other UUID spellings (simple, braced, URN) are rejected so each resource
/// has exactly one valid path representation.
pub(crate) fn parse_resource_id(value: &str) -> Option<Uuid> {
    if value.len() != RESOURCE_ID_LEN {
        return None;
    }
    Uuid::try_parse(value).ok()
}
