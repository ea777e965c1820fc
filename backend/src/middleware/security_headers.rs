//! Baseline response hardening headers.

use actix_web::http::header::{HeaderName, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS};
use actix_web::middleware::DefaultHeaders;

/// Headers attached to every response unless a handler already set them.
pub const SECURITY_HEADERS: [(HeaderName, &str); 3] = [
    (X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (X_FRAME_OPTIONS, "DENY"),
    (REFERRER_POLICY, "no-referrer"),
];

/// Build the [`DefaultHeaders`] middleware carrying [`SECURITY_HEADERS`].
///
/// # Examples
/// ```
/// use actix_web::App;
/// use mesto::middleware::security_headers;
///
/// let app = App::new().wrap(security_headers());
/// ```
pub fn security_headers() -> DefaultHeaders {
    SECURITY_HEADERS
        .into_iter()
        .fold(DefaultHeaders::new(), |headers, pair| headers.add(pair))
}
