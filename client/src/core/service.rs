//! # Service Traits
//!
//! Traits for dependency injection. Screens talk to the server only through
//! [`ApiService`], so tests can swap in a recording mock.

use async_trait::async_trait;
use chrono::NaiveDate;
use shared::{
    AdminLoginRequest, AdminLoginResponse, AuthResponse, DailyCalorieResponse,
    FoodRecognitionResponse, FoodSearchResponse, LoginRequest, MealRequest, MealResponse,
    MonthlyCalorieResponse, ResetPasswordRequest, SignUpRequest, UserManagementResponse,
};

use crate::core::error::ApiError;
use crate::services::api::ImageUpload;

/// One operation per remote capability.
///
/// Every method unwraps the response envelope: `Ok` carries the payload (or the
/// server's message for mutations without one), `Err` carries the reason.
#[async_trait]
pub trait ApiService: Send + Sync {
    /// `POST auth/signup`
    async fn sign_up(&self, request: SignUpRequest) -> Result<AuthResponse, ApiError>;

    /// `POST auth/login`
    async fn login(&self, request: LoginRequest) -> Result<AuthResponse, ApiError>;

    /// `PUT auth/users/{code}/goal?dailyCalorieGoal=N`, returns the server message
    async fn update_goal(&self, unique_code: &str, daily_calorie_goal: i32) -> Result<String, ApiError>;

    /// `GET calories/monthly/{code}/{year}/{month}`
    async fn monthly_calories(
        &self,
        unique_code: &str,
        year: i32,
        month: u32,
    ) -> Result<MonthlyCalorieResponse, ApiError>;

    /// `GET calories/daily/{code}/{date}`
    async fn daily_calories(&self, unique_code: &str, date: NaiveDate) -> Result<DailyCalorieResponse, ApiError>;

    /// `POST food/recognize` (multipart)
    async fn recognize_food(&self, unique_code: &str, image: ImageUpload) -> Result<FoodRecognitionResponse, ApiError>;

    /// `GET food/search?foodName=X`
    async fn search_food(&self, food_name: &str) -> Result<FoodSearchResponse, ApiError>;

    /// `POST meals`
    async fn create_meal(&self, request: MealRequest) -> Result<MealResponse, ApiError>;

    /// `PUT meals/{id}`
    async fn update_meal(&self, meal_id: i64, request: MealRequest) -> Result<MealResponse, ApiError>;

    /// `DELETE meals/{id}`, returns the server message
    async fn delete_meal(&self, meal_id: i64) -> Result<String, ApiError>;

    /// `GET meals/{id}`
    async fn get_meal(&self, meal_id: i64) -> Result<MealResponse, ApiError>;

    /// `GET meals/user/{code}/date/{date}`
    async fn meals_by_date(&self, unique_code: &str, date: NaiveDate) -> Result<Vec<MealResponse>, ApiError>;

    /// `POST admin/login`
    async fn admin_login(&self, request: AdminLoginRequest) -> Result<AdminLoginResponse, ApiError>;

    /// `GET admin/users`
    async fn list_users(&self) -> Result<Vec<UserManagementResponse>, ApiError>;

    /// `DELETE admin/users/{id}`, returns the server message
    async fn delete_user(&self, user_id: i64) -> Result<String, ApiError>;

    /// `PUT admin/users/{id}/reset-password`, returns the server message
    async fn reset_password(&self, user_id: i64, request: ResetPasswordRequest) -> Result<String, ApiError>;
}
