//! # CheckFood Wire Types
//!
//! This library defines the contract between the CheckFood client and the REST API.
//! All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::envelope`]**: The `{success, message, data}` wrapper around every response
//!   - **[`dto::auth`]**: Signup, login and goal update
//!   - **[`dto::calorie`]**: Monthly and daily calorie aggregates
//!   - **[`dto::food`]**: Food recognition and food search
//!   - **[`dto::meal`]**: Meal creation, update and records
//!   - **[`dto::admin`]**: Admin login and user management
//! - **[`utils`]**: Display helpers shared by every screen
//!
//! ## Wire Format
//!
//! - Field names are **camelCase** on the wire (`#[serde(rename_all = "camelCase")]`)
//! - The recognition payload is the one exception and uses **snake_case** (`food1_name`)
//! - Dates are `YYYY-MM-DD`, times of day are `HH:MM:SS`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use shared::dto::auth::{LoginRequest, AuthResponse};
//! use shared::dto::envelope::ApiResponse;
//!
//! let request = LoginRequest {
//!     email: "alice@example.com".to_string(),
//!     password: "secret123".to_string(),
//! };
//!
//! let body = r#"{"success":true,"message":"ok","data":{"userId":1,"uniqueCode":"AB12CD",
//!     "name":"Alice","email":"alice@example.com","dailyCalorieGoal":2000,"message":"ok"}}"#;
//! let envelope: ApiResponse<AuthResponse> = serde_json::from_str(body).unwrap();
//! assert!(envelope.success);
//! ```

pub mod dto;
pub mod utils;

// Wildcard re-exports: shared is a DTO library where all exports are public API
pub use dto::*;
pub use utils::*;
