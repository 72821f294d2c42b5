//! Shared error types and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard error response structure handed to transport layers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client identification
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Additional error details (field errors, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Add a detail field to the error response
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }
}

/// Error codes for the caller-visible failure classes
pub mod error_codes {
    pub const TYPE_MISMATCH: &str = "TYPE_MISMATCH";
    pub const VALUE_INVALID: &str = "VALUE_INVALID";
    pub const AUTHENTICATION_FAILED: &str = "AUTHENTICATION_FAILED";
    pub const SECURITY_VIOLATION: &str = "SECURITY_VIOLATION";
    pub const TIMEOUT: &str = "TIMEOUT";
    pub const INVARIANT_VIOLATION: &str = "INVARIANT_VIOLATION";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Trait for converting errors to ErrorResponse
pub trait IntoErrorResponse {
    fn to_error_response(&self) -> ErrorResponse;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_serialization() {
        let response = ErrorResponse::new(error_codes::TIMEOUT, "Verification token has expired")
            .add_detail("channel", "email");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["error"], "TIMEOUT");
        assert_eq!(json["details"]["channel"], "email");
    }

    #[test]
    fn test_details_omitted_when_absent() {
        let response = ErrorResponse::new(error_codes::VALUE_INVALID, "bad input");
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("details"));
    }
}
