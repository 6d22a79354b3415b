//! # Event Handlers
//!
//! User-action handlers organized by screen. Each validates input locally,
//! sets the screen's in-flight flag and spawns one task in the visit's scope.

pub mod admin;
pub mod auth;
pub mod calendar;
pub mod camera;
pub mod daily;
pub mod goal;
pub mod manual;
pub mod navigation;
pub mod recognition;
