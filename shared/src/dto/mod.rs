//! # Data Transfer Objects (DTOs)
//!
//! All data structures exchanged with the server through the REST API.
//!
//! ## Module Organization
//!
//! - [`envelope`] - Uniform `{success, message, data}` response wrapper
//! - [`auth`] - Signup, login, goal update
//! - [`calorie`] - Monthly calendar map and daily breakdown
//! - [`food`] - Image recognition and name search
//! - [`meal`] - Meal requests and records, meal categories
//! - [`admin`] - Admin login and user management
//!
//! ## Example JSON Communication
//!
//! ```text
//! POST /api/auth/login
//! Content-Type: application/json
//!
//! {
//!   "email": "alice@example.com",
//!   "password": "secret123"
//! }
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//! Content-Type: application/json
//!
//! {
//!   "success": true,
//!   "message": "로그인에 성공했습니다",
//!   "data": {
//!     "userId": 1,
//!     "uniqueCode": "AB12CD",
//!     "name": "Alice",
//!     "email": "alice@example.com",
//!     "dailyCalorieGoal": 2000,
//!     "message": "로그인에 성공했습니다"
//!   }
//! }
//! ```
//!
//! Failures use the same envelope with `success: false`, `data: null`, and
//! usually a 4xx/5xx status.

pub mod admin;
pub mod auth;
pub mod calorie;
pub mod envelope;
pub mod food;
pub mod meal;

pub use admin::*;
pub use auth::*;
pub use calorie::*;
pub use envelope::*;
pub use food::*;
pub use meal::*;
