//! Error response body shared by the HTTP layer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Standard error response structure used by all endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client identification
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    /// The single response used for every authentication failure
    ///
    /// Invalid, expired, revoked and absent tokens all look the same to the client.
    pub fn unauthenticated() -> Self {
        Self::new(error_codes::UNAUTHENTICATED, "Authentication required")
    }
}

/// Common error codes used across the application
pub mod error_codes {
    pub const UNAUTHENTICATED: &str = "UNAUTHENTICATED";
    pub const INVALID_CREDENTIALS: &str = "INVALID_CREDENTIALS";
    pub const FORBIDDEN: &str = "FORBIDDEN";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}
