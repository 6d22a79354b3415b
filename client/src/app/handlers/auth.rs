//! # Authentication Handlers
//!
//! Handlers for login, sign-up and sign-out.

use shared::{LoginRequest, SignUpRequest, DEFAULT_DAILY_CALORIE_GOAL};

use crate::app::events::AppEvent;
use crate::app::state::{AppState, Screen, SignUpState};
use crate::app::AppContext;
use crate::core::error::AppError;
use crate::utils::validation::{validate_login, validate_signup};

/// Handle login button click
///
/// Internal handler function - use [`crate::app::App::handle_login_click`] instead.
pub(crate) fn handle_login_click(ctx: &AppContext, email: String, password: String) {
    {
        let mut state = ctx.state.write();
        if state.login.loading {
            tracing::debug!("Login already in flight; ignoring tap");
            return;
        }

        state.login.email = email.clone();
        state.login.password = password.clone();

        let check = validate_login(&email, &password);
        if !check.is_valid {
            state.login.error = check.error;
            return;
        }

        state.login.loading = true;
        state.login.error = None;
    }

    let api = ctx.api.clone();
    let request = LoginRequest {
        email: email.trim().to_string(),
        password,
    };
    ctx.spawn(async move { AppEvent::LoginResult(api.login(request).await.map_err(AppError::from)) });
}

/// Handle sign-up button click
///
/// Internal handler function - use [`crate::app::App::handle_signup_click`] instead.
pub(crate) fn handle_signup_click(ctx: &AppContext, form: SignUpState) {
    {
        let mut state = ctx.state.write();
        if state.signup.loading {
            tracing::debug!("Sign-up already in flight; ignoring tap");
            return;
        }

        let check = validate_signup(
            &form.name,
            &form.email,
            &form.password,
            &form.confirm_password,
            form.terms_accepted,
            form.privacy_accepted,
        );
        state.signup = SignUpState {
            loading: check.is_valid,
            error: check.error,
            ..form.clone()
        };
        if !check.is_valid {
            return;
        }
    }

    let api = ctx.api.clone();
    let request = SignUpRequest {
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
        password: form.password,
        daily_calorie_goal: Some(DEFAULT_DAILY_CALORIE_GOAL),
    };
    ctx.spawn(async move { AppEvent::SignUpResult(api.sign_up(request).await.map_err(AppError::from)) });
}

/// Clear the session and every screen, then return to login.
pub(crate) fn handle_sign_out(ctx: &AppContext) {
    ctx.session.clear();
    {
        let mut state = ctx.state.write();
        let visit = state.visit;
        let admin = state.admin.take();
        *state = AppState {
            visit,
            admin,
            ..AppState::default()
        };
    }
    tracing::info!("Signed out");
    super::navigation::navigate(ctx, Screen::Login);
}

#[cfg(test)]
mod tests {
    use crate::app::test_support::*;
    use crate::app::{Screen, SignUpState};
    use crate::core::error::ApiError;
    use crate::core::mock::MockApiService;
    use crate::session::Session;

    #[tokio::test]
    async fn test_empty_credentials_never_call_the_server() {
        let api = MockApiService::new();
        let mut app = app_with(api.clone());

        app.handle_login_click(String::new(), "password1".into());
        assert_eq!(
            app.state.read().login.error.as_deref(),
            Some("Please enter your email and password")
        );

        app.handle_login_click("kim@example.com".into(), String::new());
        settle().await;

        assert_eq!(api.call_count("login"), 0);
        assert!(!app.state.read().login.loading);
    }

    #[tokio::test]
    async fn test_login_fills_session_from_response() {
        let api = MockApiService::new();
        let mut app = app_with(api.clone());
        api.reply("login", Ok(auth_json()));

        app.handle_login_click("kim@example.com".into(), "password1".into());
        assert!(app.state.read().login.loading);
        app.process_next_event().await;

        assert_eq!(
            app.session(),
            Session {
                user_id: 42,
                unique_code: "AB12CD".into(),
                name: "Kim".into(),
                email: "kim@example.com".into(),
                daily_calorie_goal: 1800,
            }
        );
        assert_eq!(app.current_screen(), Screen::Calendar);
        assert_eq!(api.calls()[0].detail, "kim@example.com");
    }

    #[tokio::test]
    async fn test_rejected_login_shows_server_message_verbatim() {
        let api = MockApiService::new();
        let mut app = app_with(api.clone());
        api.reply("login", Err(ApiError::Rejected("비밀번호가 일치하지 않습니다".into())));

        app.handle_login_click("kim@example.com".into(), "wrong-pass".into());
        app.process_next_event().await;

        let state = app.state.read();
        assert_eq!(state.current_screen, Screen::Login);
        assert_eq!(state.login.error.as_deref(), Some("비밀번호가 일치하지 않습니다"));
        assert!(!state.login.loading);
        drop(state);
        assert_eq!(app.session(), Session::default());
    }

    #[tokio::test]
    async fn test_network_failure_is_prefixed() {
        let api = MockApiService::new();
        let mut app = app_with(api.clone());
        api.reply("login", Err(ApiError::Network("connection refused".into())));

        app.handle_login_click("kim@example.com".into(), "password1".into());
        app.process_next_event().await;

        assert_eq!(
            app.state.read().login.error.as_deref(),
            Some("Network error: connection refused")
        );
    }

    #[tokio::test]
    async fn test_signup_sends_default_goal() {
        let api = MockApiService::new();
        let mut app = app_with(api.clone());
        app.handle_navigate(Screen::SignUp);
        api.reply("sign_up", Ok(auth_json()));

        app.handle_signup_click(SignUpState {
            name: "Kim".into(),
            email: "kim@example.com".into(),
            password: "password1".into(),
            confirm_password: "password1".into(),
            terms_accepted: true,
            privacy_accepted: true,
            ..SignUpState::default()
        });
        app.process_next_event().await;

        assert_eq!(api.call_count("sign_up"), 1);
        assert_eq!(app.current_screen(), Screen::Calendar);
        assert_eq!(app.session().user_id, 42);
    }

    #[tokio::test]
    async fn test_signup_mismatch_is_local() {
        let api = MockApiService::new();
        let mut app = app_with(api.clone());
        app.handle_navigate(Screen::SignUp);

        app.handle_signup_click(SignUpState {
            name: "Kim".into(),
            email: "kim@example.com".into(),
            password: "password1".into(),
            confirm_password: "password2".into(),
            terms_accepted: true,
            privacy_accepted: true,
            ..SignUpState::default()
        });
        settle().await;

        assert_eq!(api.total_calls(), 0);
        assert_eq!(app.state.read().signup.error.as_deref(), Some("Passwords do not match"));
    }

    #[tokio::test]
    async fn test_sign_out_resets_session() {
        let api = MockApiService::new();
        let mut app = signed_in_app(api.clone()).await;
        assert!(app.session().is_signed_in());

        app.handle_sign_out();

        let session = app.session();
        assert_eq!(session.user_id, 0);
        assert_eq!(session.unique_code, "");
        assert_eq!(session.name, "");
        assert_eq!(session.email, "");
        assert_eq!(session.daily_calorie_goal, 2000);
        assert_eq!(app.current_screen(), Screen::Login);
        assert!(app.state.read().calendar.daily_totals.is_empty());
    }

    #[tokio::test]
    async fn test_sign_out_from_camera_stops_preview() {
        let api = MockApiService::new();
        let mut app = signed_in_app(api).await;
        app.handle_navigate(Screen::Camera);
        assert!(app.ctx.capture.is_previewing());

        app.handle_sign_out();

        assert_eq!(app.current_screen(), Screen::Login);
        assert!(!app.ctx.capture.is_previewing());
        assert!(app.ctx.preview.lock().is_none());
    }
}
