//! # Backend API Client Module
//!
//! HTTP client for the CheckFood REST API. Every endpoint answers with the
//! `ApiResponse` envelope; [`ApiClient`] unwraps it into `Result<T, ApiError>`.
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs       - Module exports and documentation
//! ├── client.rs    - ApiClient, envelope handling, ApiService impl
//! ├── auth.rs      - Sign-up, login, calorie goal
//! ├── calories.rs  - Monthly and daily summaries
//! ├── food.rs      - Image recognition, food search
//! ├── meals.rs     - Meal CRUD
//! └── admin.rs     - Admin login and user management
//! ```

pub mod admin;
pub mod auth;
pub mod calories;
pub mod client;
pub mod food;
pub mod meals;

pub use client::{into_data, into_message, ApiClient};
pub use food::ImageUpload;
