//! # Application Orchestrator
//!
//! The main [`App`] struct owns the view-state, the session and the task scope,
//! and coordinates user actions with the async tasks they start.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Owning thread                            │
//! │  ┌──────────────────────────────────────────────────────┐   │
//! │  │  App (orchestrator)                                  │   │
//! │  │  - handle_*() - user actions                         │   │
//! │  │  - on_tick() / process_next_event() - task results   │   │
//! │  └────────────┬─────────────────────────────────────────┘   │
//! │               │                                             │
//! │  ┌────────────▼─────────────────────────────────────────┐   │
//! │  │  State: Arc<RwLock<AppState>>  Session: SessionHandle│   │
//! │  └──────────────────────────────────────────────────────┘   │
//! └───────────────────────┬─────────────────────────────────────┘
//!                         │ async_channel (ScreenEvent)
//! ┌───────────────────────▼─────────────────────────────────────┐
//! │              Tokio tasks (one TaskScope per screen visit)   │
//! │  ApiService calls, image capture and upload                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Screen Visits
//!
//! Every navigation bumps `AppState::visit` and aborts the tasks of the screen
//! being left. Each event carries the visit that spawned it; events from an
//! earlier visit are dropped without touching state.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use checkfood::app::App;
//! use checkfood::capture::FileFrameSource;
//! use checkfood::config::ClientConfig;
//!
//! # async fn run() -> checkfood::core::Result<()> {
//! let config = ClientConfig::from_env()?;
//! let mut app = App::new(&config, Arc::new(FileFrameSource::new()))?;
//!
//! app.handle_login_click("kim@example.com".into(), "password1".into());
//! app.process_next_event().await;
//!
//! let state = app.state.read();
//! println!("{}", state.current_screen.title());
//! # Ok(())
//! # }
//! ```

mod event_handler;
mod events;
mod handlers;
mod scope;
mod state;
pub mod view;

pub use events::{AppEvent, ScreenEvent, TaskResult};
pub use scope::TaskScope;
pub use state::*;

use std::future::Future;
use std::sync::Arc;

use async_channel::{unbounded, Receiver, Sender};
use chrono::NaiveDate;
use parking_lot::{Mutex, RwLock};
use shared::MealCategory;

use crate::capture::{CapturePipeline, FrameSource, PreviewGuard};
use crate::config::ClientConfig;
use crate::core::error::Result;
use crate::core::service::ApiService;
use crate::services::api::ApiClient;
use crate::session::{Session, SessionHandle};
use event_handler::AppEventHandler;

/// Everything a handler needs. Cheap to clone.
#[derive(Clone)]
pub(crate) struct AppContext {
    pub state: Arc<RwLock<AppState>>,
    pub events: Sender<ScreenEvent>,
    pub api: Arc<dyn ApiService>,
    pub session: SessionHandle,
    pub scope: Arc<TaskScope>,
    pub capture: Arc<CapturePipeline>,
    /// Held while the camera screen is visible
    pub preview: Arc<Mutex<Option<PreviewGuard>>>,
}

impl AppContext {
    /// Run `task` in the current visit's scope and deliver its event tagged with that visit.
    pub fn spawn<F>(&self, task: F)
    where
        F: Future<Output = AppEvent> + Send + 'static,
    {
        let visit = self.state.read().visit;
        let tx = self.events.clone();
        self.scope.spawn(async move {
            let event = task.await;
            tracing::debug!(visit, event = event.name(), "Task finished");
            if tx.send(ScreenEvent { visit, event }).await.is_err() {
                tracing::warn!(visit, "Event channel closed; result dropped");
            }
        });
    }
}

/// Main application orchestrator.
pub struct App {
    /// View-state of every screen.
    ///
    /// Read it to render; only handlers running on the owning thread write it.
    pub state: Arc<RwLock<AppState>>,

    /// Channel receiver for async task results.
    pub event_rx: Receiver<ScreenEvent>,

    ctx: AppContext,
}

impl App {
    /// Create the application with the HTTP gateway and a capture pipeline
    /// writing into `config.cache_dir`.
    pub fn new(config: &ClientConfig, frames: Arc<dyn FrameSource>) -> Result<Self> {
        let api: Arc<dyn ApiService> = Arc::new(ApiClient::new(config)?);
        let capture = Arc::new(CapturePipeline::new(frames, config.cache_dir.clone()));
        Ok(Self::with_services(api, capture))
    }

    /// Create the application around the given services.
    pub fn with_services(api: Arc<dyn ApiService>, capture: Arc<CapturePipeline>) -> Self {
        let (event_tx, event_rx) = unbounded();
        let state = Arc::new(RwLock::new(AppState::default()));

        let ctx = AppContext {
            state: Arc::clone(&state),
            events: event_tx,
            api,
            session: SessionHandle::new(),
            scope: Arc::new(TaskScope::new()),
            capture,
            preview: Arc::new(Mutex::new(None)),
        };

        tracing::info!("App state initialized - Event channel created");

        Self { state, event_rx, ctx }
    }

    /// Snapshot of the signed-in user.
    pub fn session(&self) -> Session {
        self.ctx.session.snapshot()
    }

    pub fn current_screen(&self) -> Screen {
        self.state.read().current_screen
    }

    /// Tasks of the current visit still running.
    pub fn pending_tasks(&self) -> usize {
        self.ctx.scope.pending()
    }

    /// Apply every event already waiting, without blocking.
    pub fn on_tick(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event);
            processed += 1;
        }
        processed
    }

    /// Wait for the next event and apply it. Returns false if the channel closed.
    pub async fn process_next_event(&mut self) -> bool {
        match self.event_rx.recv().await {
            Ok(event) => {
                self.handle_event(event);
                true
            }
            Err(_) => false,
        }
    }

    /// Apply a task result.
    ///
    /// Delegates to the event_handler module for processing.
    pub fn handle_event(&mut self, event: ScreenEvent) {
        self.handle_event_impl(event);
    }

    // Navigation

    pub fn handle_navigate(&mut self, screen: Screen) {
        handlers::navigation::navigate(&self.ctx, screen);
    }

    pub fn handle_back(&mut self) {
        handlers::navigation::back(&self.ctx);
    }

    // Auth

    pub fn handle_login_click(&mut self, email: String, password: String) {
        handlers::auth::handle_login_click(&self.ctx, email, password);
    }

    pub fn handle_signup_click(&mut self, form: SignUpState) {
        handlers::auth::handle_signup_click(&self.ctx, form);
    }

    pub fn handle_sign_out(&mut self) {
        handlers::auth::handle_sign_out(&self.ctx);
    }

    // Calendar and daily detail

    pub fn handle_month_change(&mut self, delta: i32) {
        handlers::calendar::handle_month_change(&self.ctx, delta);
    }

    pub fn handle_day_select(&mut self, date: NaiveDate) {
        handlers::calendar::handle_day_select(&self.ctx, date);
    }

    pub fn handle_delete_meal(&mut self, meal_id: i64) {
        handlers::daily::handle_delete_meal(&self.ctx, meal_id);
    }

    pub fn handle_change_meal_category(&mut self, meal_id: i64, category: MealCategory) {
        handlers::daily::handle_change_category(&self.ctx, meal_id, category);
    }

    pub fn handle_goal_submit(&mut self, input: String) {
        handlers::goal::handle_goal_submit(&self.ctx, input);
    }

    // Camera, recognition, manual input

    pub fn handle_capture(&mut self) {
        handlers::camera::handle_capture(&self.ctx, chrono::Local::now().naive_local());
    }

    pub fn handle_save_recognized_meal(&mut self) {
        handlers::recognition::handle_save(&self.ctx, chrono::Local::now().naive_local());
    }

    pub fn handle_retake(&mut self) {
        handlers::navigation::navigate(&self.ctx, Screen::Camera);
    }

    pub fn handle_food_search(&mut self, food_name: String) {
        handlers::manual::handle_search(&self.ctx, food_name);
    }

    pub fn handle_add_manual_meal(&mut self, food_name: String, calories: String) {
        handlers::manual::handle_add(&self.ctx, food_name, calories, chrono::Local::now().naive_local());
    }

    // Admin

    pub fn handle_admin_login_click(&mut self, username: String, password: String) {
        handlers::admin::handle_admin_login_click(&self.ctx, username, password);
    }

    pub fn handle_admin_logout(&mut self) {
        handlers::admin::handle_admin_logout(&self.ctx);
    }

    pub fn handle_delete_user(&mut self, user_id: i64) {
        handlers::admin::handle_delete_user(&self.ctx, user_id);
    }

    pub fn handle_begin_password_reset(&mut self, user_id: i64) {
        handlers::admin::handle_begin_password_reset(&self.ctx, user_id);
    }

    pub fn handle_submit_password_reset(&mut self, new_password: String, confirm_password: String) {
        handlers::admin::handle_submit_password_reset(&self.ctx, new_password, confirm_password);
    }

    pub fn handle_cancel_password_reset(&mut self) {
        handlers::admin::handle_cancel_password_reset(&self.ctx);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;
    use std::time::Duration;

    use serde_json::{json, Value};

    use super::*;
    use crate::capture::FileFrameSource;
    use crate::core::mock::MockApiService;

    pub fn app_with(api: Arc<MockApiService>) -> App {
        let frames = Arc::new(FileFrameSource::new());
        frames.stage(vec![0xFF, 0xD8, 0xFF, 0xD9]);
        let cache_dir = std::env::temp_dir().join(format!("checkfood-test-{}", uuid::Uuid::new_v4()));
        App::with_services(api, Arc::new(CapturePipeline::new(frames, cache_dir)))
    }

    /// Let spawned tasks run up to their first real suspension point.
    pub async fn settle() {
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    pub fn auth_json() -> Value {
        json!({
            "userId": 42,
            "uniqueCode": "AB12CD",
            "name": "Kim",
            "email": "kim@example.com",
            "dailyCalorieGoal": 1800,
            "message": "로그인 성공"
        })
    }

    pub fn monthly_json(year: i32, month: u32) -> Value {
        json!({
            "year": year,
            "month": month,
            "targetCalories": 1800,
            "dailyCalories": {}
        })
    }

    pub fn meal_json(id: i64, total: i32) -> Value {
        json!({
            "id": id,
            "mealDate": "2025-11-03",
            "mealTime": "12:30:00",
            "mealType": "LUNCH",
            "mealTypeKorean": "점심",
            "totalCalories": total,
            "foods": [{ "id": id * 10, "name": "비빔밥", "calories": total, "imageUrl": null }]
        })
    }

    /// Signed-in app sitting on the calendar with its first fetch answered.
    pub async fn signed_in_app(api: Arc<MockApiService>) -> App {
        let mut app = app_with(api.clone());
        api.reply("login", Ok(auth_json()));
        let today = chrono::Local::now().date_naive();
        api.reply(
            "monthly_calories",
            Ok(monthly_json(chrono::Datelike::year(&today), chrono::Datelike::month(&today))),
        );
        app.handle_login_click("kim@example.com".into(), "password1".into());
        app.process_next_event().await;
        app.process_next_event().await;
        app
    }
}
