//! # Services Module
//!
//! External integrations. The only one is the HTTP gateway to the CheckFood
//! backend.
//!
//! ```text
//! ┌──────────────┐   ApiService    ┌──────────────┐   HTTP/JSON   ┌──────────────┐
//! │   Screens    │ ──────────────> │  ApiClient   │ ────────────> │   Backend    │
//! │  (app/*)     │                 │  (api/*)     │               │  /api/*      │
//! └──────────────┘                 └──────────────┘               └──────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Returns `Result<T, ApiError>`:
//! - Network errors: "Network error: {details}"
//! - Parse errors: "Failed to parse response: {details}"
//! - Rejections: the envelope's `message`, verbatim

pub mod api;
