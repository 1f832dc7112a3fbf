//! Common error types shared across crates.

use thiserror::Error;

/// Top-level relay error type.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`RelayError::Upstream`] → 500
/// - [`RelayError::Internal`] → 500
///
/// The relay deliberately collapses all handler-side failures to 500; the
/// client receives only the error message, the full detail is logged
/// server-side before the response is written.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The delegated upstream CDR call failed — connect error, timeout, or an
    /// unreadable response body.
    #[error("upstream request failed: {0}")]
    Upstream(String),

    /// An unexpected internal error occurred.
    #[error("internal server error: {0}")]
    Internal(String),
}

impl RelayError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            RelayError::Upstream(_) => 500,
            RelayError::Internal(_) => 500,
        }
    }
}
