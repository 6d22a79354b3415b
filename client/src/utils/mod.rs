//! # Utility Functions
//!
//! Shared utility functions used across the client.
//!
//! ## Modules
//!
//! - **[`validation`]**: Form checks run before any network call
//!
//! ## Related Modules
//!
//! - [`shared::utils`]: Cross-crate utilities (calorie formatting, goal progress)
//! - [`crate::core`]: Core abstractions and error types

pub mod validation;
