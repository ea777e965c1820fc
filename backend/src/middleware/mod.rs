//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns such as
//! trace correlation and response hardening headers.

pub mod security_headers;
pub mod trace;

pub use security_headers::security_headers;
pub use trace::Trace;
