//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request DTOs convert into validated domain values with `TryFrom`; the
//! helpers here cover the parts Actix owns: body extraction and path ids.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, web};
use serde_json::json;
use tracing::debug;

use crate::domain::failure::validation_error;
use crate::domain::{CardId, Error, FieldViolation, UserId};

/// Largest accepted JSON body, in bytes.
pub const JSON_BODY_LIMIT: usize = 16 * 1024;

/// Validation error codes for bodies Actix cannot deserialise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyErrorCode {
    UnsupportedContentType,
    TooLarge,
    InvalidJson,
}

impl BodyErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::UnsupportedContentType => "unsupported_content_type",
            Self::TooLarge => "body_too_large",
            Self::InvalidJson => "invalid_json",
        }
    }
}

fn body_error(err: &JsonPayloadError) -> Error {
    let (code, message) = match err {
        JsonPayloadError::ContentType => (
            BodyErrorCode::UnsupportedContentType,
            "request body must be application/json".to_owned(),
        ),
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => (
            BodyErrorCode::TooLarge,
            format!("request body exceeds {JSON_BODY_LIMIT} bytes"),
        ),
        other => (BodyErrorCode::InvalidJson, format!("invalid request body: {other}")),
    };
    Error::invalid_request(message).with_details(json!({
        "field": "body",
        "code": code.as_str(),
    }))
}

/// JSON extractor configuration mapping every body failure to
/// `invalid_request` instead of Actix's plain-text error.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use mesto::inbound::http::validation::json_config;
///
/// let app = App::new().app_data(json_config());
/// ```
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_BODY_LIMIT)
        .error_handler(|err, req: &HttpRequest| {
            debug!(path = %req.path(), error = %err, "request body rejected");
            body_error(&err).into()
        })
}

/// Convert a domain validation failure into `invalid_request`.
pub(crate) fn reject<V: FieldViolation>(violation: V) -> Error {
    debug!(field = violation.field(), code = violation.code(), "request failed validation");
    validation_error(&violation)
}

/// Parse the `{userId}` path segment.
pub(crate) fn user_id_from_path(raw: &str) -> Result<UserId, Error> {
    UserId::new(raw).map_err(reject)
}

/// Parse the `{cardId}` path segment.
pub(crate) fn card_id_from_path(raw: &str) -> Result<CardId, Error> {
    CardId::new(raw).map_err(reject)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("not-a-uuid")]
    #[case("")]
    #[case("507f1f77bcf86cd799439011")]
    fn malformed_path_ids_are_bad_requests(#[case] raw: &str) {
        let err = card_id_from_path(raw).expect_err("malformed id");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            err.details(),
            Some(&json!({ "field": "cardId", "code": "invalid_id" }))
        );
    }

    #[rstest]
    fn well_formed_user_id_parses() {
        let raw = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
        let id = user_id_from_path(raw).expect("valid id");
        assert_eq!(id.to_string(), raw);
    }

    #[rstest]
    #[case(JsonPayloadError::ContentType, "unsupported_content_type")]
    #[case(JsonPayloadError::Overflow { limit: 1 }, "body_too_large")]
    fn body_failures_name_their_cause(#[case] err: JsonPayloadError, #[case] code: &str) {
        let mapped = body_error(&err);

        assert_eq!(mapped.code(), ErrorCode::InvalidRequest);
        assert_eq!(mapped.details().map(|d| d["code"].clone()), Some(json!(code)));
    }
}
