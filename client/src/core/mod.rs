//! # Core Abstractions
//!
//! Error types and service traits shared by every other module.
//!
//! - **[`error`]**: [`ApiError`], [`AppError`], [`Result<T>`]
//! - **[`service`]**: [`ApiService`], the seam between screens and the server
//!
//! ## Dependency Injection
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use checkfood::config::ClientConfig;
//! use checkfood::core::ApiService;
//! use checkfood::services::api::ApiClient;
//!
//! let config = ClientConfig::from_env().unwrap();
//! let api: Arc<dyn ApiService> = Arc::new(ApiClient::new(&config).unwrap());
//! ```

pub mod error;
pub mod service;

#[cfg(test)]
pub(crate) mod mock;

pub use error::{ApiError, AppError, Result};
pub use service::ApiService;
