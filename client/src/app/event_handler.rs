//! # Event Handler
//!
//! Applies async task results to the view-state and the session.
//!
//! Results are dropped unless they come from the current screen visit, so a
//! late response never touches a screen that has since been left.

use shared::{
    AdminLoginResponse, AuthResponse, DailyCalorieResponse, FoodRecognitionResponse,
    FoodSearchResponse, MealResponse, MonthlyCalorieResponse, UserManagementResponse,
};

use crate::app::events::{AppEvent, ScreenEvent, TaskResult};
use crate::app::handlers::{self, admin, manual};
use crate::app::state::{AdminLoginState, CalendarState, RecognitionState, Screen};
use crate::app::App;
use crate::capture::ImageToken;
use crate::core::error::{ApiError, AppError};

/// Trait for event handling implementation
pub(crate) trait AppEventHandler {
    fn handle_event_impl(&mut self, event: ScreenEvent);
}

impl AppEventHandler for App {
    fn handle_event_impl(&mut self, event: ScreenEvent) {
        let ScreenEvent { visit, event } = event;
        let current = self.state.read().visit;
        if visit != current {
            tracing::debug!(
                event = event.name(),
                visit,
                current,
                "Dropping result from a screen visit that has ended"
            );
            return;
        }

        tracing::debug!(event = event.name(), visit, "Applying event");

        match event {
            AppEvent::LoginResult(result) => self.handle_login_result(result),
            AppEvent::SignUpResult(result) => self.handle_signup_result(result),
            AppEvent::MonthlyLoaded { year, month, result } => self.handle_monthly_loaded(year, month, result),
            AppEvent::DailyLoaded { date, result } => self.handle_daily_loaded(date, result),
            AppEvent::GoalSaved { goal, result } => self.handle_goal_saved(goal, result),
            AppEvent::Captured(result) => self.handle_captured(result),
            AppEvent::RecognitionResult(result) => self.handle_recognition_result(result),
            AppEvent::MealSaved(result) => self.handle_meal_saved(result),
            AppEvent::FoodSearchResult(result) => self.handle_food_search_result(result),
            AppEvent::MealDeleted { meal_id, result } => self.handle_meal_deleted(meal_id, result),
            AppEvent::MealUpdated { meal_id, result } => self.handle_meal_updated(meal_id, result),
            AppEvent::AdminLoginResult(result) => self.handle_admin_login_result(result),
            AppEvent::UsersLoaded(result) => self.handle_users_loaded(result),
            AppEvent::UserDeleted { user_id, result } => self.handle_user_deleted(user_id, result),
            AppEvent::PasswordReset { user_id, result } => self.handle_password_reset(user_id, result),
        }
    }
}

impl App {
    fn handle_login_result(&mut self, result: TaskResult<AuthResponse>) {
        tracing::info!(event = "LoginResult", success = result.is_ok(), "Processing login result");

        match result {
            Ok(auth) => {
                self.ctx.session.set_from_auth(&auth);
                {
                    let mut state = self.state.write();
                    state.login.loading = false;
                    state.login.error = None;
                    state.calendar = CalendarState::default();
                }
                handlers::navigation::navigate(&self.ctx, Screen::Calendar);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Login failed");
                let mut state = self.state.write();
                state.login.loading = false;
                state.login.error = Some(e.to_string());
            }
        }
    }

    fn handle_signup_result(&mut self, result: TaskResult<AuthResponse>) {
        tracing::info!(event = "SignUpResult", success = result.is_ok(), "Processing sign-up result");

        match result {
            Ok(auth) => {
                self.ctx.session.set_from_auth(&auth);
                {
                    let mut state = self.state.write();
                    state.signup.loading = false;
                    state.calendar = CalendarState::default();
                }
                handlers::navigation::navigate(&self.ctx, Screen::Calendar);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Sign-up failed");
                let mut state = self.state.write();
                state.signup.loading = false;
                state.signup.error = Some(e.to_string());
            }
        }
    }

    fn handle_monthly_loaded(&mut self, year: i32, month: u32, result: TaskResult<MonthlyCalorieResponse>) {
        let mut state = self.state.write();
        let calendar = &mut state.calendar;
        if (calendar.year, calendar.month) != (year, month) {
            tracing::debug!(year, month, "Ignoring summary for a month no longer shown");
            return;
        }

        calendar.loading = false;
        match result {
            Ok(summary) => {
                tracing::info!(year, month, days = summary.daily_calories.len(), "Monthly calories loaded");
                calendar.daily_totals = summary.daily_calories;
                if summary.target_calories > 0 {
                    calendar.goal = summary.target_calories;
                }
                calendar.error = None;
            }
            Err(e) => {
                tracing::warn!(year, month, error = %e, "Monthly calories failed");
                calendar.error = Some(e.to_string());
            }
        }
    }

    fn handle_daily_loaded(&mut self, date: chrono::NaiveDate, result: TaskResult<DailyCalorieResponse>) {
        let mut state = self.state.write();
        let daily = &mut state.daily;
        if daily.date != Some(date) {
            return;
        }

        daily.loading = false;
        match result {
            Ok(detail) => {
                daily.target_calories = detail.target_calories;
                daily.actual_calories = detail.actual_calories;
                daily.exceeded_calories = detail.exceeded_calories;
                daily.meals = detail.meals;
                daily.error = None;
            }
            Err(e) => {
                tracing::warn!(%date, error = %e, "Daily calories failed");
                daily.error = Some(e.to_string());
            }
        }
    }

    fn handle_goal_saved(&mut self, goal: i32, result: TaskResult<String>) {
        match result {
            Ok(message) => {
                tracing::info!(goal, message = %message, "Daily goal saved");
                self.ctx.session.set_goal(goal);
                {
                    let mut state = self.state.write();
                    state.goal.saving = false;
                    state.calendar.goal = goal;
                }
                handlers::navigation::navigate(&self.ctx, Screen::Calendar);
            }
            Err(e) => {
                tracing::warn!(goal, error = %e, "Daily goal rejected");
                let mut state = self.state.write();
                state.goal.saving = false;
                state.goal.error = Some(e.to_string());
            }
        }
    }

    fn handle_captured(&mut self, result: TaskResult<ImageToken>) {
        match result {
            Ok(token) => {
                {
                    let mut state = self.state.write();
                    state.camera.capturing = false;
                    state.recognition = RecognitionState::with_image(token);
                }
                handlers::navigation::navigate(&self.ctx, Screen::Recognition);
            }
            Err(e) => {
                tracing::error!(error = %e, "Capture failed");
                let mut state = self.state.write();
                state.camera.capturing = false;
                state.camera.error = Some(e.to_string());
            }
        }
    }

    fn handle_recognition_result(&mut self, result: TaskResult<FoodRecognitionResponse>) {
        let mut state = self.state.write();
        let recognition = &mut state.recognition;
        recognition.loading = false;

        match result {
            Ok(response) => {
                recognition.foods = response.foods();
                recognition.server_total = response.total_calories;
                tracing::info!(
                    food_count = recognition.foods.len(),
                    total_calories = response.total_calories,
                    "Recognition result received"
                );
                recognition.error = (!response.success).then_some(response.message);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Recognition failed");
                recognition.error = Some(e.to_string());
            }
        }
    }

    fn handle_meal_saved(&mut self, result: TaskResult<MealResponse>) {
        match result {
            Ok(meal) => {
                tracing::info!(meal_id = meal.id, total_calories = meal.total_calories, "Meal saved");
                {
                    let mut state = self.state.write();
                    state.recognition.saving = false;
                    state.manual.saving = false;
                }
                handlers::navigation::navigate(&self.ctx, Screen::Calendar);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Meal save failed");
                let mut state = self.state.write();
                state.recognition.saving = false;
                state.manual.saving = false;
                match state.current_screen {
                    Screen::ManualInput => state.manual.error = Some(e.to_string()),
                    _ => state.recognition.error = Some(e.to_string()),
                }
            }
        }
    }

    fn handle_food_search_result(&mut self, result: TaskResult<FoodSearchResponse>) {
        let mut state = self.state.write();
        let manual = &mut state.manual;
        manual.searching = false;

        match result {
            Ok(found) => {
                manual.food_name = found.food_name;
                manual.calories_input = found.calories.to_string();
                manual.error = None;
            }
            Err(AppError::Api(ApiError::Rejected(_) | ApiError::MissingPayload)) => {
                manual.error = Some(manual::FOOD_NOT_FOUND.to_string());
            }
            Err(e) => manual.error = Some(e.to_string()),
        }
    }

    fn handle_meal_deleted(&mut self, meal_id: i64, result: TaskResult<String>) {
        let mut state = self.state.write();
        let daily = &mut state.daily;
        daily.busy_meal = None;

        match result {
            Ok(_) => {
                daily.meals.retain(|m| m.id != meal_id);
                daily.recompute_totals();
                tracing::info!(meal_id, remaining = daily.meals.len(), "Meal deleted");
            }
            Err(e) => {
                tracing::warn!(meal_id, error = %e, "Meal delete failed");
                daily.error = Some(e.to_string());
            }
        }
    }

    fn handle_meal_updated(&mut self, meal_id: i64, result: TaskResult<MealResponse>) {
        let mut state = self.state.write();
        let daily = &mut state.daily;
        daily.busy_meal = None;

        match result {
            Ok(updated) => {
                if let Some(slot) = daily.meals.iter_mut().find(|m| m.id == meal_id) {
                    *slot = updated;
                }
                daily.recompute_totals();
            }
            Err(e) => {
                tracing::warn!(meal_id, error = %e, "Meal update failed");
                daily.error = Some(e.to_string());
            }
        }
    }

    fn handle_admin_login_result(&mut self, result: TaskResult<AdminLoginResponse>) {
        match result {
            Ok(admin) => {
                tracing::info!(admin_id = admin.admin_id, "Admin logged in");
                {
                    let mut state = self.state.write();
                    state.admin = Some(admin);
                    state.admin_login = AdminLoginState::default();
                }
                handlers::navigation::navigate(&self.ctx, Screen::AdminDashboard);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Admin login failed");
                let mut state = self.state.write();
                state.admin_login.loading = false;
                state.admin_login.error = Some(e.to_string());
            }
        }
    }

    fn handle_users_loaded(&mut self, result: TaskResult<Vec<UserManagementResponse>>) {
        let mut state = self.state.write();
        state.users.loading = false;
        match result {
            Ok(users) => {
                tracing::info!(count = users.len(), "Users loaded");
                state.users.users = users;
            }
            Err(e) => state.users.error = Some(e.to_string()),
        }
    }

    fn handle_user_deleted(&mut self, user_id: i64, result: TaskResult<String>) {
        let mut state = self.state.write();
        let users = &mut state.users;
        users.busy_user = None;

        match result {
            Ok(message) => {
                users.users.retain(|u| u.user_id != user_id);
                if users.reset.as_ref().is_some_and(|f| f.user_id == user_id) {
                    users.reset = None;
                }
                users.notice = Some(notice_or(message, admin::USER_DELETED_NOTICE));
                tracing::info!(user_id, "User deleted");
            }
            Err(e) => {
                tracing::warn!(user_id, error = %e, "User delete failed");
                users.error = Some(e.to_string());
            }
        }
    }

    fn handle_password_reset(&mut self, user_id: i64, result: TaskResult<String>) {
        let mut state = self.state.write();
        let users = &mut state.users;

        match result {
            Ok(message) => {
                users.reset = None;
                users.notice = Some(notice_or(message, admin::PASSWORD_RESET_NOTICE));
                tracing::info!(user_id, "Password reset");
            }
            Err(e) => {
                tracing::warn!(user_id, error = %e, "Password reset failed");
                if let Some(form) = users.reset.as_mut() {
                    form.saving = false;
                }
                users.error = Some(e.to_string());
            }
        }
    }
}

fn notice_or(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::app::test_support::*;
    use crate::app::DailyState;
    use crate::core::mock::MockApiService;

    fn meal(id: i64, total: i32) -> MealResponse {
        serde_json::from_value(meal_json(id, total)).unwrap()
    }

    #[tokio::test]
    async fn test_event_from_earlier_visit_changes_nothing() {
        let api = MockApiService::new();
        let mut app = app_with(api);
        let before = app.state.read().clone();

        app.handle_event(ScreenEvent {
            visit: before.visit + 7,
            event: AppEvent::LoginResult(Err(AppError::validation("late"))),
        });

        assert_eq!(*app.state.read(), before);
    }

    #[tokio::test]
    async fn test_deleted_meal_leaves_list_and_totals() {
        let api = MockApiService::new();
        let mut app = app_with(api);
        let visit = {
            let mut state = app.state.write();
            let mut daily = DailyState::for_date(NaiveDate::from_ymd_opt(2025, 11, 3).unwrap());
            daily.target_calories = 1000;
            daily.meals = vec![meal(1, 700), meal(2, 600)];
            daily.recompute_totals();
            daily.busy_meal = Some(2);
            state.daily = daily;
            state.visit
        };
        assert_eq!(app.state.read().daily.exceeded_calories, 300);

        app.handle_event(ScreenEvent {
            visit,
            event: AppEvent::MealDeleted {
                meal_id: 2,
                result: Ok("식사가 삭제되었습니다".into()),
            },
        });

        let state = app.state.read();
        assert_eq!(state.daily.meals.len(), 1);
        assert_eq!(state.daily.actual_calories, 700);
        assert_eq!(state.daily.exceeded_calories, 0);
        assert_eq!(state.daily.busy_meal, None);
    }

    #[tokio::test]
    async fn test_empty_server_message_falls_back_to_notice() {
        let api = MockApiService::new();
        let mut app = app_with(api);
        let visit = app.state.read().visit;

        app.handle_event(ScreenEvent {
            visit,
            event: AppEvent::PasswordReset {
                user_id: 3,
                result: Ok("  ".into()),
            },
        });

        assert_eq!(app.state.read().users.notice.as_deref(), Some(admin::PASSWORD_RESET_NOTICE));
    }

    #[test]
    fn test_notice_prefers_server_message() {
        assert_eq!(notice_or("삭제 완료".into(), "User deleted"), "삭제 완료");
        assert_eq!(notice_or(String::new(), "User deleted"), "User deleted");
    }
}
