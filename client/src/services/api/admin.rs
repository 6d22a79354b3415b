//! # Admin Endpoints
//!
//! Administrator login and user management.

use shared::{AdminLoginRequest, AdminLoginResponse, ResetPasswordRequest, UserManagementResponse};

use super::client::ApiClient;
use crate::core::error::ApiError;

#[tracing::instrument(skip(client, request), fields(username = %request.username))]
pub async fn admin_login(
    client: &ApiClient,
    request: AdminLoginRequest,
) -> Result<AdminLoginResponse, ApiError> {
    tracing::info!("Attempting admin login");
    let builder = client.client.post(client.url(&["admin", "login"])?).json(&request);
    client.send_for_data("admin/login", builder).await
}

#[tracing::instrument(skip(client))]
pub async fn list_users(client: &ApiClient) -> Result<Vec<UserManagementResponse>, ApiError> {
    let users: Vec<UserManagementResponse> = client
        .send_for_data("admin/users", client.client.get(client.url(&["admin", "users"])?))
        .await?;

    tracing::debug!(count = users.len(), "Users loaded");
    Ok(users)
}

#[tracing::instrument(skip(client))]
pub async fn delete_user(client: &ApiClient, user_id: i64) -> Result<String, ApiError> {
    let id = user_id.to_string();
    let builder = client.client.delete(client.url(&["admin", "users", &id])?);
    client.send_for_message("admin/users/delete", builder).await
}

#[tracing::instrument(skip(client, request))]
pub async fn reset_password(
    client: &ApiClient,
    user_id: i64,
    request: ResetPasswordRequest,
) -> Result<String, ApiError> {
    let id = user_id.to_string();
    let builder = client
        .client
        .put(client.url(&["admin", "users", &id, "reset-password"])?)
        .json(&request);
    client.send_for_message("admin/users/reset-password", builder).await
}
