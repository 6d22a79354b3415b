//! # Navigation Handlers
//!
//! Screen changes with session and admin guards, and the per-screen work that
//! runs on entry.

use crate::app::state::Screen;
use crate::app::AppContext;
use crate::core::error::AppError;

/// Handle screen change with authentication guard
///
/// Leaving a screen aborts its tasks, stops the camera preview if it was
/// running and resets the screen's transient state.
pub(crate) fn navigate(ctx: &AppContext, requested: Screen) {
    let target = guard(ctx, requested);

    ctx.scope.cancel_all();

    let (from, visit) = {
        let mut state = ctx.state.write();
        let from = state.current_screen;
        state.reset_screen(from);
        state.visit += 1;
        state.current_screen = target;
        (from, state.visit)
    };

    // The preview never outlives a camera visit; entering Camera binds a new one
    if ctx.preview.lock().take().is_some() {
        tracing::debug!(from = ?from, "Released camera preview");
    }

    tracing::info!(from = ?from, to = ?target, visit, "Navigated");
    on_enter(ctx, target);
}

/// Go to the current screen's parent, if it has one.
pub(crate) fn back(ctx: &AppContext) {
    let current = ctx.state.read().current_screen;
    match current.parent() {
        Some(parent) => navigate(ctx, parent),
        None => tracing::debug!(screen = ?current, "No screen to go back to"),
    }
}

/// Whether an action belonging to `screen` may run: the screen is showing and
/// its session or admin requirement still holds.
pub(crate) fn is_active(ctx: &AppContext, screen: Screen) -> bool {
    let (current, is_admin) = {
        let state = ctx.state.read();
        (state.current_screen, state.is_admin())
    };
    let active = current == screen
        && (!screen.requires_session() || ctx.session.is_signed_in())
        && (!screen.requires_admin() || is_admin);
    if !active {
        tracing::debug!(screen = ?screen, current = ?current, "Ignoring action for an inactive screen");
    }
    active
}

fn guard(ctx: &AppContext, screen: Screen) -> Screen {
    if screen.requires_session() && !ctx.session.is_signed_in() {
        tracing::info!("Access denied: {} requires a session, redirecting to Login", screen.title());
        return Screen::Login;
    }
    if screen.requires_admin() && !ctx.state.read().is_admin() {
        tracing::info!("Access denied: {} requires an admin, redirecting to Admin Login", screen.title());
        return Screen::AdminLogin;
    }
    screen
}

fn on_enter(ctx: &AppContext, screen: Screen) {
    match screen {
        Screen::Calendar => {
            {
                let mut state = ctx.state.write();
                if state.calendar.is_unset() {
                    state.calendar.show_month_of(chrono::Local::now().date_naive());
                    state.calendar.goal = ctx.session.snapshot().daily_calorie_goal;
                }
            }
            super::calendar::fetch_month(ctx);
        }
        Screen::DailyDetail => super::daily::fetch_day(ctx),
        Screen::GoalSetting => {
            let goal = ctx.session.snapshot().daily_calorie_goal;
            let mut state = ctx.state.write();
            state.goal.current_goal = goal;
            state.goal.input = goal.to_string();
        }
        Screen::Camera => match ctx.capture.bind_preview() {
            Ok(guard) => *ctx.preview.lock() = Some(guard),
            Err(e) => {
                tracing::error!(error = %e, "Failed to start camera preview");
                ctx.state.write().camera.error = Some(AppError::from(e).to_string());
            }
        },
        Screen::Recognition => super::recognition::start(ctx),
        Screen::UserManagement => super::admin::load_users(ctx),
        Screen::Login
        | Screen::SignUp
        | Screen::ManualInput
        | Screen::AdminLogin
        | Screen::AdminDashboard => {}
    }
}

#[cfg(test)]
mod tests {
    use crate::app::test_support::*;
    use crate::app::Screen;
    use crate::core::mock::MockApiService;

    #[tokio::test]
    async fn test_signed_out_user_is_sent_to_login() {
        let api = MockApiService::new();
        let mut app = app_with(api.clone());

        app.handle_navigate(Screen::Calendar);
        assert_eq!(app.current_screen(), Screen::Login);
        assert_eq!(api.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_admin_screens_need_admin_login() {
        let api = MockApiService::new();
        let mut app = app_with(api.clone());

        app.handle_navigate(Screen::UserManagement);
        assert_eq!(app.current_screen(), Screen::AdminLogin);
        assert_eq!(api.call_count("list_users"), 0);
    }

    #[tokio::test]
    async fn test_navigation_bumps_visit() {
        let api = MockApiService::new();
        let mut app = app_with(api);
        let before = app.state.read().visit;

        app.handle_navigate(Screen::SignUp);
        app.handle_back();

        assert_eq!(app.current_screen(), Screen::Login);
        assert_eq!(app.state.read().visit, before + 2);
    }

    #[tokio::test]
    async fn test_camera_preview_follows_screen() {
        let api = MockApiService::new();
        let mut app = signed_in_app(api).await;

        app.handle_navigate(Screen::Camera);
        assert!(app.ctx.capture.is_previewing());

        app.handle_back();
        assert_eq!(app.current_screen(), Screen::Calendar);
        assert!(!app.ctx.capture.is_previewing());
    }
}
