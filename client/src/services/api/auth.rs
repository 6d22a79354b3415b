//! # Authentication Endpoints
//!
//! Sign-up, login, and the daily calorie goal.

use shared::{AuthResponse, LoginRequest, SignUpRequest};

use super::client::ApiClient;
use crate::core::error::ApiError;

/// Login with email and password.
#[tracing::instrument(skip(client, request), fields(email = %request.email))]
pub async fn login(client: &ApiClient, request: LoginRequest) -> Result<AuthResponse, ApiError> {
    tracing::info!("Attempting login");

    let builder = client.client.post(client.url(&["auth", "login"])?).json(&request);
    let auth: AuthResponse = client.send_for_data("auth/login", builder).await?;

    tracing::info!(user_id = auth.user_id, "Login successful");
    Ok(auth)
}

/// Register a new account.
#[tracing::instrument(skip(client, request), fields(email = %request.email))]
pub async fn sign_up(client: &ApiClient, request: SignUpRequest) -> Result<AuthResponse, ApiError> {
    tracing::info!("Attempting sign-up");

    let builder = client.client.post(client.url(&["auth", "signup"])?).json(&request);
    let auth: AuthResponse = client.send_for_data("auth/signup", builder).await?;

    tracing::info!(user_id = auth.user_id, "Sign-up successful");
    Ok(auth)
}

/// Replace the user's daily calorie goal. Returns the server message.
#[tracing::instrument(skip(client))]
pub async fn update_goal(
    client: &ApiClient,
    unique_code: &str,
    daily_calorie_goal: i32,
) -> Result<String, ApiError> {
    let url = client.url(&["auth", "users", unique_code, "goal"])?;
    let builder = client
        .client
        .put(url)
        .query(&[("dailyCalorieGoal", daily_calorie_goal)]);

    client.send_for_message("auth/users/goal", builder).await
}
