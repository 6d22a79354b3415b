//! # Camera Handlers

use chrono::NaiveDateTime;

use crate::app::events::AppEvent;
use crate::app::state::Screen;
use crate::app::AppContext;
use crate::core::error::AppError;

/// Capture a still into the cache directory.
///
/// On success the event handler moves to recognition with the image token;
/// on failure the camera screen stays up with the error.
pub(crate) fn handle_capture(ctx: &AppContext, now: NaiveDateTime) {
    if !super::navigation::is_active(ctx, Screen::Camera) {
        return;
    }
    {
        let mut state = ctx.state.write();
        if state.camera.capturing {
            tracing::debug!("Capture already in flight; ignoring tap");
            return;
        }
        state.camera.capturing = true;
        state.camera.error = None;
    }

    let capture = ctx.capture.clone();
    ctx.spawn(async move { AppEvent::Captured(capture.capture(now).await.map_err(AppError::from)) });
}
