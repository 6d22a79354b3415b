//! # Admin Handlers
//!
//! Administrator login and user management.

use shared::{AdminLoginRequest, ResetPasswordRequest};

use crate::app::events::AppEvent;
use crate::app::state::{ResetPasswordForm, Screen};
use crate::app::AppContext;
use crate::core::error::AppError;
use crate::utils::validation::{validate_admin_login, validate_new_password};

pub(crate) const USER_DELETED_NOTICE: &str = "User deleted";
pub(crate) const PASSWORD_RESET_NOTICE: &str = "Password has been reset";

pub(crate) fn handle_admin_login_click(ctx: &AppContext, username: String, password: String) {
    {
        let mut state = ctx.state.write();
        if state.admin_login.loading {
            return;
        }
        state.admin_login.username = username.clone();
        state.admin_login.password = password.clone();

        let check = validate_admin_login(&username, &password);
        if !check.is_valid {
            state.admin_login.error = check.error;
            return;
        }
        state.admin_login.loading = true;
        state.admin_login.error = None;
    }

    let api = ctx.api.clone();
    let request = AdminLoginRequest {
        username: username.trim().to_string(),
        password,
    };
    ctx.spawn(async move { AppEvent::AdminLoginResult(api.admin_login(request).await.map_err(AppError::from)) });
}

pub(crate) fn handle_admin_logout(ctx: &AppContext) {
    ctx.state.write().admin = None;
    tracing::info!("Admin logged out");
    super::navigation::navigate(ctx, Screen::AdminLogin);
}

/// Fetch every user. Runs on entering user management.
pub(crate) fn load_users(ctx: &AppContext) {
    {
        let mut state = ctx.state.write();
        state.users.loading = true;
        state.users.error = None;
    }
    let api = ctx.api.clone();
    ctx.spawn(async move { AppEvent::UsersLoaded(api.list_users().await.map_err(AppError::from)) });
}

pub(crate) fn handle_delete_user(ctx: &AppContext, user_id: i64) {
    if !super::navigation::is_active(ctx, Screen::UserManagement) {
        return;
    }
    {
        let mut state = ctx.state.write();
        if state.users.busy_user.is_some() {
            tracing::debug!(user_id, "User change already in flight; ignoring tap");
            return;
        }
        state.users.busy_user = Some(user_id);
        state.users.error = None;
        state.users.notice = None;
    }

    let api = ctx.api.clone();
    ctx.spawn(async move {
        let result = api.delete_user(user_id).await.map_err(AppError::from);
        AppEvent::UserDeleted { user_id, result }
    });
}

/// Open the reset form for one user.
pub(crate) fn handle_begin_password_reset(ctx: &AppContext, user_id: i64) {
    if !super::navigation::is_active(ctx, Screen::UserManagement) {
        return;
    }
    let mut state = ctx.state.write();
    if !state.users.users.iter().any(|u| u.user_id == user_id) {
        state.users.error = Some(AppError::State(format!("unknown user {user_id}")).to_string());
        return;
    }
    state.users.reset = Some(ResetPasswordForm {
        user_id,
        new_password: String::new(),
        confirm_password: String::new(),
        saving: false,
    });
    state.users.error = None;
    state.users.notice = None;
}

pub(crate) fn handle_cancel_password_reset(ctx: &AppContext) {
    if !super::navigation::is_active(ctx, Screen::UserManagement) {
        return;
    }
    let mut state = ctx.state.write();
    if state.users.reset.as_ref().is_some_and(|f| !f.saving) {
        state.users.reset = None;
    }
}

pub(crate) fn handle_submit_password_reset(ctx: &AppContext, new_password: String, confirm_password: String) {
    if !super::navigation::is_active(ctx, Screen::UserManagement) {
        return;
    }
    let user_id = {
        let mut state = ctx.state.write();
        let users = &mut state.users;
        let Some(form) = users.reset.as_mut() else {
            users.error = Some(AppError::State("no password reset in progress".to_string()).to_string());
            return;
        };
        if form.saving {
            return;
        }
        form.new_password = new_password.clone();
        form.confirm_password = confirm_password.clone();

        let check = validate_new_password(&new_password, &confirm_password);
        if !check.is_valid {
            users.error = check.error;
            return;
        }
        form.saving = true;
        let user_id = form.user_id;
        users.error = None;
        user_id
    };

    let api = ctx.api.clone();
    let request = ResetPasswordRequest { new_password };
    ctx.spawn(async move {
        let result = api.reset_password(user_id, request).await.map_err(AppError::from);
        AppEvent::PasswordReset { user_id, result }
    });
}
