//! # CheckFood Client - Library Root
//!
//! Client for the CheckFood calorie-tracking service: sign in, browse a month
//! of daily calorie totals against a goal, photograph meals for server-side
//! food recognition, log meals by hand, and administer user accounts.
//! This library crate contains all modules used by the binary crate (`main.rs`).
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │              checkfood (this crate)                    │
//! ├────────────────────────────────────────────────────────┤
//! │  app       - Screens, view-state, task orchestration   │
//! │  capture   - Still-image capture and image tokens      │
//! │  services  - HTTP gateway (reqwest)                    │
//! │  session   - Signed-in user shared by all screens      │
//! └────────────────────────────────────────────────────────┘
//!          │
//!          │ HTTP + JSON envelope
//!          ▼
//! ┌─────────────────┐
//! │  CheckFood API  │
//! └─────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - **app**: Screen state machine, per-visit task scopes, event handling
//! - **capture**: Frame sources, the capture pipeline, [`capture::ImageToken`]
//! - **config**: [`config::ClientConfig`] loaded from the environment
//! - **core**: Error types and the [`core::ApiService`] trait
//! - **debug**: File-based structured logging
//! - **services**: `api::ApiClient`, one module per endpoint group
//! - **session**: [`session::SessionHandle`]
//! - **utils**: Form validation
//!
//! ## Core Concepts
//!
//! ### Event-Driven Architecture
//!
//! User actions run on the thread that owns the view-state. Network calls and
//! image capture run as Tokio tasks and report back through an
//! `async_channel` as [`app::ScreenEvent`]s.
//!
//! ### State Management
//!
//! View-state lives in `Arc<parking_lot::RwLock<AppState>>`. Locks are held
//! briefly and never across an `.await`.
//!
//! ## Testing
//!
//! ```bash
//! cargo test -p checkfood
//! ```
//!
//! Screen handlers are tested against an in-memory `ApiService`; the HTTP
//! gateway is tested against an in-process axum server (`tests/`).

pub mod app;
pub mod capture;
pub mod config;
pub mod core;
pub mod debug;
pub mod services;
pub mod session;
pub mod utils;

// Re-export commonly used types for convenience
pub use app::{App, AppEvent, AppState, Screen};
pub use core::{AppError, Result};
