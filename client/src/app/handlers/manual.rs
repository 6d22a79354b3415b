//! # Manual Input Handlers
//!
//! Type a food by hand, optionally looking up its calories by name first.

use chrono::NaiveDateTime;
use shared::{MealCategory, MealRequest, RecognizedFood};

use crate::app::events::AppEvent;
use crate::app::state::Screen;
use crate::app::AppContext;
use crate::core::error::{AppError, Result};
use crate::utils::validation::{parse_calories, validate_food_name};

/// Shown when the server has no calorie data for the name searched.
pub(crate) const FOOD_NOT_FOUND: &str = "Food not found";

pub(crate) fn handle_search(ctx: &AppContext, food_name: String) {
    if !super::navigation::is_active(ctx, Screen::ManualInput) {
        return;
    }
    {
        let mut state = ctx.state.write();
        if state.manual.searching {
            return;
        }
        state.manual.food_name = food_name.clone();

        let check = validate_food_name(&food_name);
        if !check.is_valid {
            state.manual.error = check.error;
            return;
        }
        state.manual.searching = true;
        state.manual.error = None;
    }

    let api = ctx.api.clone();
    let name = food_name.trim().to_string();
    ctx.spawn(async move { AppEvent::FoodSearchResult(api.search_food(&name).await.map_err(AppError::from)) });
}

/// Save a one-food meal at `now`.
pub(crate) fn handle_add(ctx: &AppContext, food_name: String, calories: String, now: NaiveDateTime) {
    if !super::navigation::is_active(ctx, Screen::ManualInput) {
        return;
    }
    let code = ctx.session.unique_code();
    let request = {
        let mut state = ctx.state.write();
        if state.manual.saving {
            tracing::debug!("Manual meal save already in flight; ignoring tap");
            return;
        }
        state.manual.food_name = food_name.clone();
        state.manual.calories_input = calories.clone();

        match build_request(code, &food_name, &calories, now) {
            Ok(request) => {
                state.manual.saving = true;
                state.manual.error = None;
                request
            }
            Err(e) => {
                state.manual.error = Some(e.to_string());
                return;
            }
        }
    };

    let api = ctx.api.clone();
    ctx.spawn(async move { AppEvent::MealSaved(api.create_meal(request).await.map_err(AppError::from)) });
}

fn build_request(code: String, food_name: &str, calories: &str, now: NaiveDateTime) -> Result<MealRequest> {
    validate_food_name(food_name).into_result()?;
    let calories = parse_calories(calories)?;

    let food = RecognizedFood {
        name: food_name.trim().to_string(),
        calories,
    };
    MealRequest::new(code, now.date(), now.time(), MealCategory::for_time(now.time()), &[food])
        .map_err(|e| AppError::validation(e.to_string()))
}
