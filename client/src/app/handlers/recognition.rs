//! # Recognition Handlers
//!
//! Upload the captured image on entry, show what was found, save it as a meal.

use std::sync::Arc;

use chrono::NaiveDateTime;
use shared::{FoodRecognitionResponse, MealCategory, MealRequest};

use crate::app::events::{AppEvent, TaskResult};
use crate::app::state::Screen;
use crate::app::AppContext;
use crate::capture::ImageToken;
use crate::core::error::AppError;
use crate::core::service::ApiService;

/// Upload the captured image for recognition.
pub(crate) fn start(ctx: &AppContext) {
    let image = {
        let mut state = ctx.state.write();
        match state.recognition.image.clone() {
            Some(image) => {
                state.recognition.loading = true;
                state.recognition.error = None;
                image
            }
            None => {
                state.recognition.error =
                    Some(AppError::State("no captured image".to_string()).to_string());
                return;
            }
        }
    };

    let api = ctx.api.clone();
    let code = ctx.session.unique_code();
    ctx.spawn(async move { AppEvent::RecognitionResult(recognize(api, code, image).await) });
}

async fn recognize(
    api: Arc<dyn ApiService>,
    unique_code: String,
    image: ImageToken,
) -> TaskResult<FoodRecognitionResponse> {
    let upload = image.load().await?;
    Ok(api.recognize_food(&unique_code, upload).await?)
}

/// Save the recognized foods as a meal at `now`.
///
/// With nothing recognized there is nothing to save; go straight back to the calendar.
pub(crate) fn handle_save(ctx: &AppContext, now: NaiveDateTime) {
    if !super::navigation::is_active(ctx, Screen::Recognition) {
        return;
    }
    let code = ctx.session.unique_code();
    let request = {
        let mut state = ctx.state.write();
        let recognition = &mut state.recognition;
        if recognition.saving || recognition.loading {
            tracing::debug!("Recognition busy; ignoring save tap");
            return;
        }

        if recognition.foods.is_empty() {
            None
        } else {
            let category = MealCategory::for_time(now.time());
            match MealRequest::new(code, now.date(), now.time(), category, &recognition.foods) {
                Ok(request) => {
                    recognition.saving = true;
                    recognition.error = None;
                    Some(request)
                }
                Err(e) => {
                    recognition.error = Some(AppError::validation(e.to_string()).to_string());
                    return;
                }
            }
        }
    };

    let Some(request) = request else {
        tracing::info!("No foods recognized; returning to calendar without saving");
        super::navigation::navigate(ctx, Screen::Calendar);
        return;
    };

    tracing::info!(food_count = request.food_count, meal_type = request.meal_type.token(), "Saving recognized meal");
    let api = ctx.api.clone();
    ctx.spawn(async move { AppEvent::MealSaved(api.create_meal(request).await.map_err(AppError::from)) });
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;
    use crate::app::test_support::*;
    use crate::core::error::ApiError;
    use crate::core::mock::MockApiService;

    fn two_foods() -> serde_json::Value {
        json!({
            "success": true,
            "message": "2개의 음식이 인식되었습니다",
            "food_count": 2,
            "food1_name": "김치찌개",
            "food1_calories": 450,
            "food2_name": "쌀밥",
            "food2_calories": 300,
            "food3_name": null,
            "food3_calories": null,
            "total_calories": 750
        })
    }

    async fn recognition_app(api: Arc<MockApiService>, reply: serde_json::Value) -> crate::app::App {
        let mut app = signed_in_app(api.clone()).await;
        api.reply("recognize_food", Ok(reply));
        app.handle_navigate(Screen::Camera);
        app.handle_capture();
        // Captured, then the upload started on entering recognition
        app.process_next_event().await;
        app.process_next_event().await;
        app
    }

    fn lunch_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 11, 3)
            .unwrap()
            .and_hms_milli_opt(12, 30, 5, 250)
            .unwrap()
    }

    #[tokio::test]
    async fn test_two_foods_render_two_rows_and_their_sum() {
        let api = MockApiService::new();
        let app = recognition_app(api.clone(), two_foods()).await;

        let state = app.state.read();
        assert_eq!(state.current_screen, Screen::Recognition);
        assert_eq!(state.recognition.foods.len(), 2);
        assert_eq!(state.recognition.displayed_total(), 750);
        assert!(!state.recognition.loading);
        assert!(api.calls().iter().any(|c| c.op == "recognize_food" && c.detail.starts_with("AB12CD:")));
    }

    #[tokio::test]
    async fn test_save_creates_meal_for_current_hour() {
        let api = MockApiService::new();
        let mut app = recognition_app(api.clone(), two_foods()).await;
        api.reply("create_meal", Ok(meal_json(9, 750)));

        handle_save(&app.ctx, lunch_time());
        app.process_next_event().await;

        let call = api.calls().into_iter().find(|c| c.op == "create_meal").unwrap();
        let body: serde_json::Value = serde_json::from_str(&call.detail).unwrap();
        assert_eq!(body["mealType"], "LUNCH");
        assert_eq!(body["mealDate"], "2025-11-03");
        assert_eq!(body["mealTime"], "12:30:05");
        assert_eq!(body["foodCount"], 2);
        assert_eq!(body["food2Name"], "쌀밥");
        assert_eq!(app.current_screen(), Screen::Calendar);
    }

    #[tokio::test]
    async fn test_second_save_tap_issues_no_second_call() {
        let api = MockApiService::new();
        let mut app = recognition_app(api.clone(), two_foods()).await;
        api.hold();
        api.reply("create_meal", Ok(meal_json(9, 750)));

        handle_save(&app.ctx, lunch_time());
        handle_save(&app.ctx, lunch_time());
        settle().await;

        assert_eq!(api.call_count("create_meal"), 1);
        api.release(1);
        app.process_next_event().await;
        assert_eq!(app.current_screen(), Screen::Calendar);
    }

    #[tokio::test]
    async fn test_nothing_recognized_goes_back_without_saving() {
        let api = MockApiService::new();
        let empty = json!({
            "success": false,
            "message": "음식을 인식하지 못했습니다",
            "food_count": 0,
            "total_calories": 0
        });
        let mut app = recognition_app(api.clone(), empty).await;
        assert_eq!(
            app.state.read().recognition.error.as_deref(),
            Some("음식을 인식하지 못했습니다")
        );

        handle_save(&app.ctx, lunch_time());

        assert_eq!(api.call_count("create_meal"), 0);
        assert_eq!(app.current_screen(), Screen::Calendar);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_foods_for_retry() {
        let api = MockApiService::new();
        let mut app = recognition_app(api.clone(), two_foods()).await;
        api.reply("create_meal", Err(ApiError::Rejected("음식 개수가 올바르지 않습니다".into())));

        handle_save(&app.ctx, lunch_time());
        app.process_next_event().await;

        let state = app.state.read();
        assert_eq!(state.current_screen, Screen::Recognition);
        assert_eq!(state.recognition.foods.len(), 2);
        assert_eq!(state.recognition.error.as_deref(), Some("음식 개수가 올바르지 않습니다"));
        assert!(!state.recognition.saving);
    }

    #[tokio::test]
    async fn test_retake_drops_result() {
        let api = MockApiService::new();
        let mut app = recognition_app(api.clone(), two_foods()).await;

        app.handle_retake();

        let state = app.state.read();
        assert_eq!(state.current_screen, Screen::Camera);
        assert!(state.recognition.foods.is_empty());
        assert!(state.recognition.image.is_none());
    }
}
