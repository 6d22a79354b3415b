//! # API Client
//!
//! Main HTTP client for backend API communication, plus the envelope handling
//! shared by every endpoint module.

use std::time::Instant;

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use shared::ApiResponse;
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::core::error::{ApiError, AppError};
use crate::core::service::ApiService;

/// HTTP client for the CheckFood REST API.
///
/// Holds one connection pool for the whole process. Cheap to share behind an `Arc`.
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client with the configured base URL and timeouts.
    pub fn new(config: &ClientConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {e}")))?;

        tracing::info!(
            base_url = %config.api_base_url,
            connect_timeout_secs = config.connect_timeout.as_secs(),
            request_timeout_secs = config.request_timeout.as_secs(),
            "API client created"
        );

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append endpoint path segments to the base URL. Each segment is
    /// percent-encoded, so user codes and dates can never add path levels.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidRequest(format!("base URL {} cannot take a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send a request and parse the envelope.
    ///
    /// The server wraps failures in the same envelope as successes and pairs them
    /// with 4xx/5xx codes, so the body is parsed whatever the status.
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> Result<ApiResponse<T>, ApiError> {
        let request_id = Uuid::new_v4();
        let start = Instant::now();
        tracing::debug!(%request_id, endpoint, "Sending request");

        let response = request.send().await.map_err(|e| {
            tracing::error!(%request_id, endpoint, error = %e, "Network error");
            ApiError::from(e)
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            tracing::error!(%request_id, endpoint, error = %e, "Failed to read response body");
            ApiError::Network(e.to_string())
        })?;
        let duration_ms = start.elapsed().as_millis();
        if crate::debug::is_debug_mode() {
            tracing::debug!(%request_id, endpoint, body = %String::from_utf8_lossy(&body), "Response body");
        }

        let envelope = serde_json::from_slice::<ApiResponse<T>>(&body).map_err(|e| {
            tracing::error!(
                %request_id,
                endpoint,
                status = status.as_u16(),
                duration_ms,
                error = %e,
                "Response is not a valid envelope"
            );
            ApiError::Decode(format!("HTTP {}: {e}", status.as_u16()))
        })?;

        if envelope.success {
            tracing::info!(%request_id, endpoint, status = status.as_u16(), duration_ms, "Request succeeded");
        } else {
            tracing::warn!(
                %request_id,
                endpoint,
                status = status.as_u16(),
                duration_ms,
                message = %envelope.message,
                "Request rejected by server"
            );
        }

        Ok(envelope)
    }

    /// Send and return the payload, which the endpoint always carries on success.
    pub(crate) async fn send_for_data<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        into_data(self.send(endpoint, request).await?)
    }

    /// Send a mutation without a payload and return the server's message.
    pub(crate) async fn send_for_message(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> Result<String, ApiError> {
        into_message(self.send::<serde_json::Value>(endpoint, request).await?)
    }
}

/// Unwrap an envelope into its payload.
pub fn into_data<T>(envelope: ApiResponse<T>) -> Result<T, ApiError> {
    if !envelope.success {
        return Err(ApiError::Rejected(envelope.message));
    }
    envelope.data.ok_or(ApiError::MissingPayload)
}

/// Unwrap an envelope that carries no payload into its message.
pub fn into_message<T>(envelope: ApiResponse<T>) -> Result<String, ApiError> {
    if envelope.success {
        Ok(envelope.message)
    } else {
        Err(ApiError::Rejected(envelope.message))
    }
}

// Implement ApiService trait for ApiClient
#[async_trait::async_trait]
impl ApiService for ApiClient {
    async fn sign_up(&self, request: shared::SignUpRequest) -> Result<shared::AuthResponse, ApiError> {
        crate::services::api::auth::sign_up(self, request).await
    }

    async fn login(&self, request: shared::LoginRequest) -> Result<shared::AuthResponse, ApiError> {
        crate::services::api::auth::login(self, request).await
    }

    async fn update_goal(&self, unique_code: &str, daily_calorie_goal: i32) -> Result<String, ApiError> {
        crate::services::api::auth::update_goal(self, unique_code, daily_calorie_goal).await
    }

    async fn monthly_calories(
        &self,
        unique_code: &str,
        year: i32,
        month: u32,
    ) -> Result<shared::MonthlyCalorieResponse, ApiError> {
        crate::services::api::calories::monthly_calories(self, unique_code, year, month).await
    }

    async fn daily_calories(
        &self,
        unique_code: &str,
        date: chrono::NaiveDate,
    ) -> Result<shared::DailyCalorieResponse, ApiError> {
        crate::services::api::calories::daily_calories(self, unique_code, date).await
    }

    async fn recognize_food(
        &self,
        unique_code: &str,
        image: crate::services::api::ImageUpload,
    ) -> Result<shared::FoodRecognitionResponse, ApiError> {
        crate::services::api::food::recognize_food(self, unique_code, image).await
    }

    async fn search_food(&self, food_name: &str) -> Result<shared::FoodSearchResponse, ApiError> {
        crate::services::api::food::search_food(self, food_name).await
    }

    async fn create_meal(&self, request: shared::MealRequest) -> Result<shared::MealResponse, ApiError> {
        crate::services::api::meals::create_meal(self, request).await
    }

    async fn update_meal(&self, meal_id: i64, request: shared::MealRequest) -> Result<shared::MealResponse, ApiError> {
        crate::services::api::meals::update_meal(self, meal_id, request).await
    }

    async fn delete_meal(&self, meal_id: i64) -> Result<String, ApiError> {
        crate::services::api::meals::delete_meal(self, meal_id).await
    }

    async fn get_meal(&self, meal_id: i64) -> Result<shared::MealResponse, ApiError> {
        crate::services::api::meals::get_meal(self, meal_id).await
    }

    async fn meals_by_date(
        &self,
        unique_code: &str,
        date: chrono::NaiveDate,
    ) -> Result<Vec<shared::MealResponse>, ApiError> {
        crate::services::api::meals::meals_by_date(self, unique_code, date).await
    }

    async fn admin_login(&self, request: shared::AdminLoginRequest) -> Result<shared::AdminLoginResponse, ApiError> {
        crate::services::api::admin::admin_login(self, request).await
    }

    async fn list_users(&self) -> Result<Vec<shared::UserManagementResponse>, ApiError> {
        crate::services::api::admin::list_users(self).await
    }

    async fn delete_user(&self, user_id: i64) -> Result<String, ApiError> {
        crate::services::api::admin::delete_user(self, user_id).await
    }

    async fn reset_password(&self, user_id: i64, request: shared::ResetPasswordRequest) -> Result<String, ApiError> {
        crate::services::api::admin::reset_password(self, user_id, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_data_maps_rejection_to_message() {
        let env: ApiResponse<i32> = ApiResponse::error("목표 칼로리는 1000 이상이어야 합니다");
        assert_eq!(
            into_data(env),
            Err(ApiError::Rejected("목표 칼로리는 1000 이상이어야 합니다".to_string()))
        );
    }

    #[test]
    fn test_into_data_requires_payload() {
        let env: ApiResponse<i32> = ApiResponse::ok_empty("ok");
        assert_eq!(into_data(env), Err(ApiError::MissingPayload));
        assert_eq!(into_data(ApiResponse::ok("ok", 5)), Ok(5));
    }

    #[test]
    fn test_into_message() {
        let env: ApiResponse<()> = ApiResponse::ok_empty("삭제되었습니다");
        assert_eq!(into_message(env), Ok("삭제되었습니다".to_string()));
    }

    #[test]
    fn test_url_joins_under_base() {
        let client = ApiClient::new(&ClientConfig::default()).unwrap();
        assert_eq!(
            client.url(&["calories", "monthly", "AB12", "2025", "11"]).unwrap().as_str(),
            "http://127.0.0.1:8080/api/calories/monthly/AB12/2025/11"
        );
    }

    #[test]
    fn test_url_escapes_each_segment() {
        let client = ApiClient::new(&ClientConfig::default()).unwrap();
        assert_eq!(
            client.url(&["auth", "users", "A B/../x?y", "goal"]).unwrap().as_str(),
            "http://127.0.0.1:8080/api/auth/users/A%20B%2F..%2Fx%3Fy/goal"
        );
    }
}
