//! Recording [`ApiService`] for handler tests.
//!
//! Replies are queued per operation as JSON values and deserialized into the
//! operation's payload type. Every call is recorded before its reply is taken.
//! An optional gate holds calls in flight until the test releases them.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::*;
use tokio::sync::Semaphore;

use crate::core::error::ApiError;
use crate::core::service::ApiService;
use crate::services::api::ImageUpload;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Call {
    pub op: &'static str,
    pub detail: String,
}

#[derive(Default)]
pub(crate) struct MockApiService {
    calls: Mutex<Vec<Call>>,
    replies: Mutex<HashMap<&'static str, VecDeque<Result<Value, ApiError>>>>,
    gate: Mutex<Option<Arc<Semaphore>>>,
}

impl MockApiService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a reply for `op`.
    pub fn reply(&self, op: &'static str, reply: Result<Value, ApiError>) {
        self.replies.lock().entry(op).or_default().push_back(reply);
    }

    /// Hold every subsequent call until [`MockApiService::release`] is called.
    pub fn hold(&self) {
        *self.gate.lock() = Some(Arc::new(Semaphore::new(0)));
    }

    /// Let `n` held calls through.
    pub fn release(&self, n: usize) {
        if let Some(gate) = self.gate.lock().as_ref() {
            gate.add_permits(n);
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self, op: &str) -> usize {
        self.calls.lock().iter().filter(|c| c.op == op).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().len()
    }

    async fn answer<T: DeserializeOwned>(&self, op: &'static str, detail: String) -> Result<T, ApiError> {
        self.calls.lock().push(Call { op, detail });

        let gate = self.gate.lock().clone();
        if let Some(gate) = gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }

        let reply = self
            .replies
            .lock()
            .get_mut(op)
            .and_then(|queue| queue.pop_front())
            .unwrap_or_else(|| Err(ApiError::Network(format!("no reply stubbed for {op}"))));

        reply.and_then(|value| serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string())))
    }
}

#[async_trait]
impl ApiService for MockApiService {
    async fn sign_up(&self, request: SignUpRequest) -> Result<AuthResponse, ApiError> {
        self.answer("sign_up", request.email).await
    }

    async fn login(&self, request: LoginRequest) -> Result<AuthResponse, ApiError> {
        self.answer("login", request.email).await
    }

    async fn update_goal(&self, unique_code: &str, daily_calorie_goal: i32) -> Result<String, ApiError> {
        self.answer("update_goal", format!("{unique_code}:{daily_calorie_goal}")).await
    }

    async fn monthly_calories(&self, unique_code: &str, year: i32, month: u32) -> Result<MonthlyCalorieResponse, ApiError> {
        self.answer("monthly_calories", format!("{unique_code}:{year}-{month}")).await
    }

    async fn daily_calories(&self, unique_code: &str, date: NaiveDate) -> Result<DailyCalorieResponse, ApiError> {
        self.answer("daily_calories", format!("{unique_code}:{date}")).await
    }

    async fn recognize_food(&self, unique_code: &str, image: ImageUpload) -> Result<FoodRecognitionResponse, ApiError> {
        self.answer("recognize_food", format!("{unique_code}:{}:{}", image.file_name, image.bytes.len()))
            .await
    }

    async fn search_food(&self, food_name: &str) -> Result<FoodSearchResponse, ApiError> {
        self.answer("search_food", food_name.to_string()).await
    }

    async fn create_meal(&self, request: MealRequest) -> Result<MealResponse, ApiError> {
        let detail = serde_json::to_string(&request).unwrap_or_default();
        self.answer("create_meal", detail).await
    }

    async fn update_meal(&self, meal_id: i64, request: MealRequest) -> Result<MealResponse, ApiError> {
        self.answer("update_meal", format!("{meal_id}:{}", request.meal_type.token())).await
    }

    async fn delete_meal(&self, meal_id: i64) -> Result<String, ApiError> {
        self.answer("delete_meal", meal_id.to_string()).await
    }

    async fn get_meal(&self, meal_id: i64) -> Result<MealResponse, ApiError> {
        self.answer("get_meal", meal_id.to_string()).await
    }

    async fn meals_by_date(&self, unique_code: &str, date: NaiveDate) -> Result<Vec<MealResponse>, ApiError> {
        self.answer("meals_by_date", format!("{unique_code}:{date}")).await
    }

    async fn admin_login(&self, request: AdminLoginRequest) -> Result<AdminLoginResponse, ApiError> {
        self.answer("admin_login", request.username).await
    }

    async fn list_users(&self) -> Result<Vec<UserManagementResponse>, ApiError> {
        self.answer("list_users", String::new()).await
    }

    async fn delete_user(&self, user_id: i64) -> Result<String, ApiError> {
        self.answer("delete_user", user_id.to_string()).await
    }

    async fn reset_password(&self, user_id: i64, request: ResetPasswordRequest) -> Result<String, ApiError> {
        self.answer("reset_password", format!("{user_id}:{}", request.new_password.len()))
            .await
    }
}
