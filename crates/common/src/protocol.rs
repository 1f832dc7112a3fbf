//! Response bodies exchanged over the relay's own HTTP surface.
//!
//! The two delegated routes (`/api/apr`, `/api/agent_status`) relay the
//! upstream's JSON verbatim and define no types here.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /`.
///
/// The body is a fixed liveness message; the route carries no readiness
/// semantics (the relay holds no state to be ready with).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Fixed liveness message, `"Server is running..."`.
    pub message: String,
}

impl HealthResponse {
    /// The health payload served on `GET /`.
    pub fn running() -> Self {
        Self {
            message: "Server is running...".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status the relay
/// produces itself (404 fallback, 500 handler failure).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable description safe to expose to callers.
    pub error: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_serialises_to_exact_wire_shape() {
        let body = serde_json::to_string(&HealthResponse::running()).unwrap();
        assert_eq!(body, r#"{"message":"Server is running..."}"#);
    }

    #[test]
    fn error_serialises_to_exact_wire_shape() {
        let body = serde_json::to_string(&ErrorResponse::new("Not Found")).unwrap();
        assert_eq!(body, r#"{"error":"Not Found"}"#);
    }

    #[test]
    fn error_round_trip() {
        let json = r#"{"error":"upstream request failed: timed out"}"#;
        let parsed: ErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.error, "upstream request failed: timed out");
    }
}
