//! # Goal Setting Handlers

use crate::app::events::AppEvent;
use crate::app::state::Screen;
use crate::app::AppContext;
use crate::core::error::AppError;
use crate::utils::validation::parse_daily_goal;

/// Validate and save a new daily goal.
pub(crate) fn handle_goal_submit(ctx: &AppContext, input: String) {
    if !super::navigation::is_active(ctx, Screen::GoalSetting) {
        return;
    }
    let goal = {
        let mut state = ctx.state.write();
        if state.goal.saving {
            tracing::debug!("Goal save already in flight; ignoring tap");
            return;
        }
        state.goal.input = input.clone();

        match parse_daily_goal(&input) {
            Ok(goal) => {
                state.goal.saving = true;
                state.goal.error = None;
                goal
            }
            Err(e) => {
                state.goal.error = Some(e.to_string());
                return;
            }
        }
    };

    let api = ctx.api.clone();
    let code = ctx.session.unique_code();
    ctx.spawn(async move {
        let result = api.update_goal(&code, goal).await.map_err(AppError::from);
        AppEvent::GoalSaved { goal, result }
    });
}
