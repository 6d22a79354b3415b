//! # Calendar Handlers

use chrono::NaiveDate;

use crate::app::events::AppEvent;
use crate::app::state::{DailyState, Screen};
use crate::app::AppContext;
use crate::core::error::AppError;

/// Fetch the month the calendar is showing.
///
/// Month changes can overlap; results for a month no longer shown are dropped
/// when applied.
pub(crate) fn fetch_month(ctx: &AppContext) {
    let (year, month) = {
        let mut state = ctx.state.write();
        state.calendar.loading = true;
        state.calendar.error = None;
        (state.calendar.year, state.calendar.month)
    };

    let api = ctx.api.clone();
    let code = ctx.session.unique_code();
    tracing::debug!(year, month, "Fetching monthly calories");
    ctx.spawn(async move {
        let result = api
            .monthly_calories(&code, year, month)
            .await
            .map_err(AppError::from);
        AppEvent::MonthlyLoaded { year, month, result }
    });
}

/// Previous (`-1`) or next (`1`) month.
pub(crate) fn handle_month_change(ctx: &AppContext, delta: i32) {
    {
        let mut state = ctx.state.write();
        if state.current_screen != Screen::Calendar {
            return;
        }
        if !state.calendar.shift_month(delta) {
            tracing::warn!(delta, "Month change out of range");
            return;
        }
    }
    fetch_month(ctx);
}

pub(crate) fn handle_day_select(ctx: &AppContext, date: NaiveDate) {
    ctx.state.write().daily = DailyState::for_date(date);
    super::navigation::navigate(ctx, Screen::DailyDetail);
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, NaiveDate};
    use serde_json::json;

    use crate::app::test_support::*;
    use crate::app::{AppEvent, Screen, ScreenEvent};
    use crate::core::error::ApiError;
    use crate::core::mock::MockApiService;

    #[tokio::test]
    async fn test_month_change_fetches_new_month() {
        let api = MockApiService::new();
        let mut app = signed_in_app(api.clone()).await;
        let (year, month) = {
            let state = app.state.read();
            (state.calendar.year, state.calendar.month)
        };
        let next = NaiveDate::from_ymd_opt(year, month, 1)
            .unwrap()
            .checked_add_months(chrono::Months::new(1))
            .unwrap();

        api.reply(
            "monthly_calories",
            Ok(json!({
                "year": next.year(),
                "month": next.month(),
                "targetCalories": 1800,
                "dailyCalories": { next.to_string(): 2100 }
            })),
        );
        app.handle_month_change(1);
        app.process_next_event().await;

        let state = app.state.read();
        assert_eq!((state.calendar.year, state.calendar.month), (next.year(), next.month()));
        assert_eq!(state.calendar.daily_totals.get(&next), Some(&2100));
        assert!(state.calendar.days()[0].over_goal);
        assert!(!state.calendar.loading);
        drop(state);
        assert_eq!(api.call_count("monthly_calories"), 2);
    }

    #[tokio::test]
    async fn test_result_for_another_month_is_ignored() {
        let api = MockApiService::new();
        let mut app = signed_in_app(api.clone()).await;
        let visit = app.state.read().visit;

        app.handle_event(ScreenEvent {
            visit,
            event: AppEvent::MonthlyLoaded {
                year: 1999,
                month: 1,
                result: Ok(serde_json::from_value(monthly_json(1999, 1)).unwrap()),
            },
        });

        assert_ne!(app.state.read().calendar.year, 1999);
    }

    #[tokio::test]
    async fn test_fetch_failure_sets_error() {
        let api = MockApiService::new();
        let mut app = signed_in_app(api.clone()).await;
        api.reply("monthly_calories", Err(ApiError::Rejected("사용자를 찾을 수 없습니다".into())));

        app.handle_month_change(-1);
        app.process_next_event().await;

        let state = app.state.read();
        assert_eq!(state.calendar.error.as_deref(), Some("사용자를 찾을 수 없습니다"));
        assert_eq!(state.current_screen, Screen::Calendar);
    }

    #[tokio::test]
    async fn test_stale_visit_result_does_not_change_state() {
        let api = MockApiService::new();
        let mut app = signed_in_app(api.clone()).await;
        let old_visit = app.state.read().visit;

        app.handle_navigate(Screen::GoalSetting);
        let before = app.state.read().clone();

        app.handle_event(ScreenEvent {
            visit: old_visit,
            event: AppEvent::MonthlyLoaded {
                year: before.calendar.year,
                month: before.calendar.month,
                result: Err(ApiError::Network("late".into()).into()),
            },
        });

        assert_eq!(*app.state.read(), before);
    }

    #[tokio::test]
    async fn test_leaving_screen_cancels_its_fetch() {
        let api = MockApiService::new();
        let mut app = signed_in_app(api.clone()).await;
        api.hold();
        api.reply("monthly_calories", Ok(monthly_json(1999, 1)));

        app.handle_month_change(1);
        settle().await;
        assert_eq!(app.pending_tasks(), 1);

        app.handle_navigate(Screen::GoalSetting);
        api.release(1);
        settle().await;

        assert_eq!(app.pending_tasks(), 0);
        assert_eq!(app.on_tick(), 0);
        assert_eq!(app.current_screen(), Screen::GoalSetting);
    }
}
