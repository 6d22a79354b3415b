//! # Session Holder
//!
//! The signed-in identity. Owned by [`crate::app::App`] and shared with screens as
//! owned snapshots; only the event handler writes it, through [`SessionHandle`].
//!
//! Nothing is persisted: a restart starts signed out.

use std::sync::Arc;

use parking_lot::RwLock;
use shared::{AuthResponse, DEFAULT_DAILY_CALORIE_GOAL};

/// Identity and goal of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: i64,
    pub unique_code: String,
    pub name: String,
    pub email: String,
    pub daily_calorie_goal: i32,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            user_id: 0,
            unique_code: String::new(),
            name: String::new(),
            email: String::new(),
            daily_calorie_goal: DEFAULT_DAILY_CALORIE_GOAL,
        }
    }
}

impl Session {
    pub fn is_signed_in(&self) -> bool {
        self.user_id != 0 && !self.unique_code.is_empty()
    }
}

impl From<&AuthResponse> for Session {
    fn from(auth: &AuthResponse) -> Self {
        Self {
            user_id: auth.user_id,
            unique_code: auth.unique_code.clone(),
            name: auth.name.clone(),
            email: auth.email.clone(),
            daily_calorie_goal: auth.daily_calorie_goal,
        }
    }
}

/// Shared handle to the one session of this process.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    inner: Arc<RwLock<Session>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Owned copy for rendering or for moving into a task.
    pub fn snapshot(&self) -> Session {
        self.inner.read().clone()
    }

    pub fn unique_code(&self) -> String {
        self.inner.read().unique_code.clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.inner.read().is_signed_in()
    }

    /// Overwrite every field at once.
    pub fn set(
        &self,
        user_id: i64,
        unique_code: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        daily_calorie_goal: i32,
    ) {
        let session = Session {
            user_id,
            unique_code: unique_code.into(),
            name: name.into(),
            email: email.into(),
            daily_calorie_goal,
        };
        tracing::info!(user_id, "Session set");
        *self.inner.write() = session;
    }

    pub fn set_from_auth(&self, auth: &AuthResponse) {
        tracing::info!(user_id = auth.user_id, "Session set");
        *self.inner.write() = Session::from(auth);
    }

    pub fn set_goal(&self, daily_calorie_goal: i32) {
        self.inner.write().daily_calorie_goal = daily_calorie_goal;
        tracing::debug!(daily_calorie_goal, "Session goal updated");
    }

    /// Back to the signed-out defaults.
    pub fn clear(&self) {
        *self.inner.write() = Session::default();
        tracing::info!("Session cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_session_is_signed_out() {
        let session = Session::default();
        assert_eq!(session.user_id, 0);
        assert_eq!(session.daily_calorie_goal, 2000);
        assert!(!session.is_signed_in());
    }

    #[test]
    fn test_set_then_clear() {
        let handle = SessionHandle::new();
        handle.set(7, "AB12CD", "Kim", "kim@example.com", 1800);
        assert!(handle.is_signed_in());
        assert_eq!(handle.unique_code(), "AB12CD");

        handle.set_goal(2200);
        assert_eq!(handle.snapshot().daily_calorie_goal, 2200);
        assert_eq!(handle.snapshot().name, "Kim");

        handle.clear();
        assert_eq!(handle.snapshot(), Session::default());
    }

    #[test]
    fn test_clones_share_one_session() {
        let handle = SessionHandle::new();
        let other = handle.clone();
        other.set(1, "X", "n", "e", 1500);
        assert_eq!(handle.snapshot().daily_calorie_goal, 1500);
    }
}
