//! # Common Error Types
//!
//! Consolidated error handling for the CheckFood client.
//!
//! ## Error Categories
//!
//! - **[`ApiError`]**: anything that went wrong talking to the server
//!   - `Rejected`: the server answered `success = false`; the message is shown verbatim
//!   - `Network`: connect/timeout/transport fault
//!   - `Decode`: the body was not a valid envelope
//!   - `MissingPayload`: `success = true` without the payload the call needs
//! - **[`AppError`]**: everything a screen can end up displaying
//!   - `Api`: wraps [`ApiError`] transparently
//!   - `Capture`: wraps [`crate::capture::CaptureError`] transparently
//!   - `Validation`: local input checks, raised before any call is issued
//!   - `Config` / `State`: startup and navigation problems
//!
//! Every screen stores `error.to_string()`, so `Display` output is user-facing text.
//!
//! ## Usage Pattern
//!
//! ```rust,no_run
//! use checkfood::core::error::AppError;
//!
//! fn validate_name(name: &str) -> Result<(), AppError> {
//!     if name.trim().is_empty() {
//!         return Err(AppError::Validation("Enter a food name".to_string()));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Failure of one API call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Server-side validation or business failure (`success = false`).
    ///
    /// Displayed exactly as the server wrote it.
    #[error("{0}")]
    Rejected(String),

    /// Connection refused, DNS failure, timeout or broken transfer.
    #[error("Network error: {0}")]
    Network(String),

    /// The response body could not be parsed as an envelope.
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// `success = true` but no `data` where the endpoint always returns some.
    #[error("Server returned no data")]
    MissingPayload,

    /// The request could not be built (bad URL join, bad multipart part).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if err.is_builder() {
            ApiError::InvalidRequest(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Application-wide error type.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AppError {
    /// Remote call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Camera/capture pipeline failed.
    #[error(transparent)]
    Capture(#[from] crate::capture::CaptureError),

    /// Local input validation failed; no call was issued.
    #[error("{0}")]
    Validation(String),

    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Navigation or view-state problem (e.g. a screen opened without its input).
    #[error("State error: {0}")]
    State(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }
}

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_displays_server_message_verbatim() {
        let err = AppError::from(ApiError::Rejected("이미 존재하는 이메일입니다".to_string()));
        assert_eq!(err.to_string(), "이미 존재하는 이메일입니다");
    }

    #[test]
    fn test_network_error_is_prefixed() {
        let err = ApiError::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn test_validation_message_is_plain() {
        assert_eq!(
            AppError::validation("Set at least 1000 kcal").to_string(),
            "Set at least 1000 kcal"
        );
    }
}
