use serde::{Deserialize, Serialize};

/// Admin login request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdminLoginRequest {
    pub username: String,
    pub password: String,
}

/// Admin login payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdminLoginResponse {
    pub admin_id: i64,
    pub username: String,
    #[serde(default)]
    pub message: String,
}

/// User record as listed in the admin panel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserManagementResponse {
    pub user_id: i64,
    pub unique_code: String,
    pub name: String,
    pub email: String,
    pub daily_calorie_goal: i32,
    #[serde(default)]
    pub created_at: String,
}

/// Password reset request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub new_password: String,
}
