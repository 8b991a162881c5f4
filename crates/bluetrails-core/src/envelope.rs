//! The uniform JSON response envelope
//!
//! Every endpoint answers with one of two shapes so clients can branch on a
//! single structure: `{success, message, data}` on success and
//! `{error: {message, code, status}}` on failure.

use serde::{Deserialize, Serialize};

/// Successful response envelope
///
/// `message` is serialized even when absent; clients treat `null` as
/// "no message".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessEnvelope {
    pub success: bool,
    pub message: Option<String>,
    pub data: serde_json::Value,
}

impl SuccessEnvelope {
    /// Wrap `data` in a success envelope
    pub fn new(data: serde_json::Value, message: Option<String>) -> Self {
        Self {
            success: true,
            message,
            data,
        }
    }
}

/// Error response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

/// The structured error inside an [`ErrorEnvelope`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    pub code: String,
    pub status: u16,
}

impl ErrorEnvelope {
    /// Build an error envelope from its parts
    pub fn new(message: impl Into<String>, code: impl Into<String>, status: u16) -> Self {
        Self {
            error: ErrorBody {
                message: message.into(),
                code: code.into(),
                status,
            },
        }
    }
}
