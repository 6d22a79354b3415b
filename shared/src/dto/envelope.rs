//! # Response Envelope
//!
//! Every endpoint wraps its payload in [`ApiResponse`].

use serde::{Deserialize, Serialize};

/// Uniform response wrapper: `{success, message, data}`.
///
/// `data` is `null` on failure and on mutations that return nothing
/// (goal update, delete, password reset).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Successful envelope carrying a payload.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Successful envelope with no payload.
    pub fn ok_empty(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }

    /// Failed envelope. The message is what the user sees.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}
