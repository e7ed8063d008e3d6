//! Response bodies returned by the HTTP handlers.

use serde::{Deserialize, Serialize};

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status. Provisioning completes before the listener
    /// starts, so a reachable server always reports `"ok"`.
    pub status: String,
}

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"not_found"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_response_serde() {
        let h = HealthResponse {
            status: "ok".into(),
        };
        let json = serde_json::to_string(&h).unwrap();
        let decoded: HealthResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.status, "ok");
    }

    #[test]
    fn error_response_new() {
        let e = ErrorResponse::new("not_found", "no such resource");
        assert_eq!(e.code, "not_found");
        assert!(e.message.contains("no such resource"));
    }
}
