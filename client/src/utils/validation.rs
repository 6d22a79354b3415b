/// Validation utilities for user input
///
/// Every check runs before a network call; a failed check never reaches the server.

use crate::core::error::{AppError, Result};

pub const MIN_DAILY_GOAL: i32 = 1000;
pub const MAX_DAILY_GOAL: i32 = 4000;
pub const MIN_SIGNUP_PASSWORD_LEN: usize = 8;
pub const MIN_RESET_PASSWORD_LEN: usize = 6;

pub struct ValidationResult {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(message.into()),
        }
    }

    /// Convert into the crate error type so handlers can use `?`.
    pub fn into_result(self) -> Result<()> {
        match self.error {
            Some(message) if !self.is_valid => Err(AppError::Validation(message)),
            _ => Ok(()),
        }
    }
}

/// Login form: both fields required.
pub fn validate_login(email: &str, password: &str) -> ValidationResult {
    if email.trim().is_empty() || password.is_empty() {
        return ValidationResult::err("Please enter your email and password");
    }
    ValidationResult::ok()
}

/// Sign-up form.
pub fn validate_signup(
    name: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
    terms_accepted: bool,
    privacy_accepted: bool,
) -> ValidationResult {
    if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() || confirm_password.is_empty() {
        return ValidationResult::err("Please fill in all fields");
    }

    if password != confirm_password {
        return ValidationResult::err("Passwords do not match");
    }

    if password.chars().count() < MIN_SIGNUP_PASSWORD_LEN {
        return ValidationResult::err("Password must be at least 8 characters");
    }

    if !terms_accepted || !privacy_accepted {
        return ValidationResult::err("Please accept the required terms");
    }

    ValidationResult::ok()
}

/// Parse a daily calorie goal in `[1000, 4000]`.
pub fn parse_daily_goal(input: &str) -> Result<i32> {
    let goal = input
        .trim()
        .parse::<i32>()
        .map_err(|_| AppError::validation("Enter a valid calorie value"))?;

    if goal < MIN_DAILY_GOAL {
        return Err(AppError::validation("Set at least 1000 kcal"));
    }
    if goal > MAX_DAILY_GOAL {
        return Err(AppError::validation("Set at most 4000 kcal"));
    }
    Ok(goal)
}

pub fn validate_food_name(name: &str) -> ValidationResult {
    if name.trim().is_empty() {
        return ValidationResult::err("Enter a food name");
    }
    ValidationResult::ok()
}

/// Parse a calorie amount typed by hand. Negative values are rejected.
pub fn parse_calories(input: &str) -> Result<i32> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("Enter calories"));
    }

    match trimmed.parse::<i32>() {
        Ok(calories) if calories >= 0 => Ok(calories),
        _ => Err(AppError::validation("Enter a valid calorie value")),
    }
}

pub fn validate_admin_login(username: &str, password: &str) -> ValidationResult {
    if username.trim().is_empty() || password.trim().is_empty() {
        return ValidationResult::err("Enter username and password");
    }
    ValidationResult::ok()
}

/// Admin password reset: at least 6 characters, typed twice.
pub fn validate_new_password(password: &str, confirm_password: &str) -> ValidationResult {
    if password.trim().is_empty() {
        return ValidationResult::err("Enter a password");
    }

    if password.chars().count() < MIN_RESET_PASSWORD_LEN {
        return ValidationResult::err("Password must be at least 6 characters");
    }

    if password != confirm_password {
        return ValidationResult::err("Passwords do not match");
    }

    ValidationResult::ok()
}
