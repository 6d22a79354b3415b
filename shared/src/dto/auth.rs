use serde::{Deserialize, Serialize};

/// Default daily calorie goal for new accounts and empty sessions.
pub const DEFAULT_DAILY_CALORIE_GOAL: i32 = 2000;

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Signup request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_calorie_goal: Option<i32>,
}

/// Authentication payload (login/signup success)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user_id: i64,
    pub unique_code: String,
    pub name: String,
    pub email: String,
    pub daily_calorie_goal: i32,
    #[serde(default)]
    pub message: String,
}
