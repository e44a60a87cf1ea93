//! Common response body structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Error body returned for non-authentication failures
/// (unknown routes, unauthorized access, internal errors)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub error: String,

    /// Human-readable message
    pub message: String,

    /// When the error was produced
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}
