//! # Application Events
//!
//! Results of async tasks, sent back to the thread that owns the view-state.

use chrono::NaiveDate;
use shared::{
    AdminLoginResponse, AuthResponse, DailyCalorieResponse, FoodRecognitionResponse,
    FoodSearchResponse, MealResponse, MonthlyCalorieResponse, UserManagementResponse,
};

use crate::capture::ImageToken;
use crate::core::error::AppError;

pub type TaskResult<T> = Result<T, AppError>;

/// Async task results sent to main thread
#[derive(Debug, Clone)]
pub enum AppEvent {
    LoginResult(TaskResult<AuthResponse>),
    SignUpResult(TaskResult<AuthResponse>),
    MonthlyLoaded {
        year: i32,
        month: u32,
        result: TaskResult<MonthlyCalorieResponse>,
    },
    DailyLoaded {
        date: NaiveDate,
        result: TaskResult<DailyCalorieResponse>,
    },
    GoalSaved {
        goal: i32,
        result: TaskResult<String>,
    },
    /// Camera wrote a still image
    Captured(TaskResult<ImageToken>),
    RecognitionResult(TaskResult<FoodRecognitionResponse>),
    /// A meal was created from the recognition or manual-entry screen
    MealSaved(TaskResult<MealResponse>),
    FoodSearchResult(TaskResult<FoodSearchResponse>),
    MealDeleted {
        meal_id: i64,
        result: TaskResult<String>,
    },
    MealUpdated {
        meal_id: i64,
        result: TaskResult<MealResponse>,
    },
    AdminLoginResult(TaskResult<AdminLoginResponse>),
    UsersLoaded(TaskResult<Vec<UserManagementResponse>>),
    UserDeleted {
        user_id: i64,
        result: TaskResult<String>,
    },
    PasswordReset {
        user_id: i64,
        result: TaskResult<String>,
    },
}

impl AppEvent {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            AppEvent::LoginResult(_) => "LoginResult",
            AppEvent::SignUpResult(_) => "SignUpResult",
            AppEvent::MonthlyLoaded { .. } => "MonthlyLoaded",
            AppEvent::DailyLoaded { .. } => "DailyLoaded",
            AppEvent::GoalSaved { .. } => "GoalSaved",
            AppEvent::Captured(_) => "Captured",
            AppEvent::RecognitionResult(_) => "RecognitionResult",
            AppEvent::MealSaved(_) => "MealSaved",
            AppEvent::FoodSearchResult(_) => "FoodSearchResult",
            AppEvent::MealDeleted { .. } => "MealDeleted",
            AppEvent::MealUpdated { .. } => "MealUpdated",
            AppEvent::AdminLoginResult(_) => "AdminLoginResult",
            AppEvent::UsersLoaded(_) => "UsersLoaded",
            AppEvent::UserDeleted { .. } => "UserDeleted",
            AppEvent::PasswordReset { .. } => "PasswordReset",
        }
    }
}

/// An event tagged with the screen visit whose task produced it.
#[derive(Debug, Clone)]
pub struct ScreenEvent {
    pub visit: u64,
    pub event: AppEvent,
}
