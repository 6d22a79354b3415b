//! # Shared Display Helpers
//!
//! Formatting used by the calendar, daily detail and recognition screens.
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::{format_kcal, goal_progress};
//!
//! assert_eq!(format_kcal(1650), "1,650 kcal");
//! assert_eq!(goal_progress(1000, 2000), 0.5);
//! ```

/// Format a calorie count with thousands separators and a `kcal` suffix.
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_kcal;
///
/// assert_eq!(format_kcal(0), "0 kcal");
/// assert_eq!(format_kcal(12500), "12,500 kcal");
/// assert_eq!(format_kcal(-300), "-300 kcal");
/// ```
pub fn format_kcal(calories: i32) -> String {
    let digits = calories.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if calories < 0 { "-" } else { "" };
    format!("{sign}{grouped} kcal")
}

/// Fraction of the goal consumed, clamped to `0.0..=1.0`.
///
/// A non-positive goal counts as fully consumed once anything was eaten.
pub fn goal_progress(actual: i32, goal: i32) -> f32 {
    if goal <= 0 {
        return if actual > 0 { 1.0 } else { 0.0 };
    }
    (actual as f32 / goal as f32).clamp(0.0, 1.0)
}

/// Calories over the goal, or 0 when within it.
pub fn calories_over_goal(actual: i32, goal: i32) -> i32 {
    (actual - goal).max(0)
}
