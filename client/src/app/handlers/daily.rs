//! # Daily Detail Handlers
//!
//! One day's target, actual, excess and meals. Meals can be deleted or moved
//! to another category.

use shared::{MealCategory, MealRequest};

use crate::app::events::AppEvent;
use crate::app::state::Screen;
use crate::app::AppContext;
use crate::core::error::AppError;

pub(crate) fn fetch_day(ctx: &AppContext) {
    let date = {
        let mut state = ctx.state.write();
        match state.daily.date {
            Some(date) => {
                state.daily.loading = true;
                state.daily.error = None;
                date
            }
            None => {
                state.daily.error = Some(AppError::State("no day selected".to_string()).to_string());
                return;
            }
        }
    };

    let api = ctx.api.clone();
    let code = ctx.session.unique_code();
    ctx.spawn(async move {
        let result = api.daily_calories(&code, date).await.map_err(AppError::from);
        AppEvent::DailyLoaded { date, result }
    });
}

/// Delete a meal; it leaves the list once the server confirms.
pub(crate) fn handle_delete_meal(ctx: &AppContext, meal_id: i64) {
    if !super::navigation::is_active(ctx, Screen::DailyDetail) {
        return;
    }
    {
        let mut state = ctx.state.write();
        if let Some(busy) = state.daily.busy_meal {
            tracing::debug!(busy, meal_id, "Meal change already in flight; ignoring tap");
            return;
        }
        if !state.daily.meals.iter().any(|m| m.id == meal_id) {
            return;
        }
        state.daily.busy_meal = Some(meal_id);
        state.daily.error = None;
    }

    let api = ctx.api.clone();
    ctx.spawn(async move {
        let result = api.delete_meal(meal_id).await.map_err(AppError::from);
        AppEvent::MealDeleted { meal_id, result }
    });
}

/// Resubmit a meal unchanged except for its category.
pub(crate) fn handle_change_category(ctx: &AppContext, meal_id: i64, category: MealCategory) {
    if !super::navigation::is_active(ctx, Screen::DailyDetail) {
        return;
    }
    let code = ctx.session.unique_code();
    let request = {
        let mut state = ctx.state.write();
        if state.daily.busy_meal.is_some() {
            tracing::debug!(meal_id, "Meal change already in flight; ignoring tap");
            return;
        }
        let Some(meal) = state.daily.meals.iter().find(|m| m.id == meal_id) else {
            return;
        };
        if meal.meal_type == category {
            return;
        }

        let request = MealRequest::new(
            code,
            meal.meal_date,
            meal.meal_time,
            category,
            &meal.food_items(),
        );
        match request {
            Ok(request) => {
                state.daily.busy_meal = Some(meal_id);
                state.daily.error = None;
                request
            }
            Err(e) => {
                state.daily.error = Some(AppError::validation(e.to_string()).to_string());
                return;
            }
        }
    };

    let api = ctx.api.clone();
    ctx.spawn(async move {
        let result = api.update_meal(meal_id, request).await.map_err(AppError::from);
        AppEvent::MealUpdated { meal_id, result }
    });
}
