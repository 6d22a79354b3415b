//! # Application State Types
//!
//! View-state for every screen. Each screen owns its inputs, a loading or
//! saving flag that doubles as its in-flight guard, and an error string.

use std::collections::BTreeMap;

use chrono::{Datelike, Months, NaiveDate};
use shared::{
    AdminLoginResponse, MealResponse, RecognizedFood, UserManagementResponse,
    DEFAULT_DAILY_CALORIE_GOAL,
};

use crate::capture::ImageToken;

/// Application screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Login,
    SignUp,
    /// Month view of daily totals (home screen once signed in)
    Calendar,
    DailyDetail,
    GoalSetting,
    Camera,
    /// Upload of a captured image and the foods found in it
    Recognition,
    ManualInput,
    AdminLogin,
    AdminDashboard,
    UserManagement,
}

impl Screen {
    pub fn all() -> &'static [Screen] {
        &[
            Screen::Login,
            Screen::SignUp,
            Screen::Calendar,
            Screen::DailyDetail,
            Screen::GoalSetting,
            Screen::Camera,
            Screen::Recognition,
            Screen::ManualInput,
            Screen::AdminLogin,
            Screen::AdminDashboard,
            Screen::UserManagement,
        ]
    }

    /// Get screen title for header display
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Login => "Login",
            Screen::SignUp => "Sign Up",
            Screen::Calendar => "Calorie Calendar",
            Screen::DailyDetail => "Daily Detail",
            Screen::GoalSetting => "Daily Goal",
            Screen::Camera => "Camera",
            Screen::Recognition => "Food Recognition",
            Screen::ManualInput => "Manual Entry",
            Screen::AdminLogin => "Admin Login",
            Screen::AdminDashboard => "Admin Dashboard",
            Screen::UserManagement => "User Management",
        }
    }

    /// Where "back" leads. `None` for root screens.
    pub fn parent(&self) -> Option<Screen> {
        match self {
            Screen::Login | Screen::Calendar | Screen::AdminDashboard => None,
            Screen::SignUp | Screen::AdminLogin => Some(Screen::Login),
            Screen::DailyDetail | Screen::GoalSetting | Screen::Camera => Some(Screen::Calendar),
            Screen::Recognition | Screen::ManualInput => Some(Screen::Camera),
            Screen::UserManagement => Some(Screen::AdminDashboard),
        }
    }

    pub fn requires_session(&self) -> bool {
        matches!(
            self,
            Screen::Calendar
                | Screen::DailyDetail
                | Screen::GoalSetting
                | Screen::Camera
                | Screen::Recognition
                | Screen::ManualInput
        )
    }

    pub fn requires_admin(&self) -> bool {
        matches!(self, Screen::AdminDashboard | Screen::UserManagement)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginState {
    pub email: String,
    pub password: String,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignUpState {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub terms_accepted: bool,
    pub privacy_accepted: bool,
    pub loading: bool,
    pub error: Option<String>,
}

/// One cell of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub total: Option<i32>,
    pub over_goal: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MonthStats {
    pub logged_days: usize,
    pub over_goal_days: usize,
    pub average_calories: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarState {
    pub year: i32,
    pub month: u32,
    pub goal: i32,
    pub daily_totals: BTreeMap<NaiveDate, i32>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for CalendarState {
    fn default() -> Self {
        Self {
            year: 0,
            month: 0,
            goal: DEFAULT_DAILY_CALORIE_GOAL,
            daily_totals: BTreeMap::new(),
            loading: false,
            error: None,
        }
    }
}

impl CalendarState {
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn is_unset(&self) -> bool {
        self.first_day().is_none()
    }

    /// Point the calendar at the month containing `date`.
    pub fn show_month_of(&mut self, date: NaiveDate) {
        self.year = date.year();
        self.month = date.month();
        self.daily_totals.clear();
    }

    /// Move `delta` months forward (negative for backward). Returns false if out of range.
    pub fn shift_month(&mut self, delta: i32) -> bool {
        let Some(first) = self.first_day() else {
            return false;
        };
        let moved = if delta >= 0 {
            first.checked_add_months(Months::new(delta.unsigned_abs()))
        } else {
            first.checked_sub_months(Months::new(delta.unsigned_abs()))
        };
        match moved {
            Some(date) => {
                self.show_month_of(date);
                true
            }
            None => false,
        }
    }

    pub fn days(&self) -> Vec<CalendarDay> {
        let Some(first) = self.first_day() else {
            return Vec::new();
        };
        first
            .iter_days()
            .take_while(|d| d.month() == self.month)
            .map(|date| {
                let total = self.daily_totals.get(&date).copied();
                CalendarDay {
                    date,
                    total,
                    over_goal: total.is_some_and(|t| t > self.goal),
                }
            })
            .collect()
    }

    pub fn stats(&self) -> MonthStats {
        let logged: Vec<i32> = self.daily_totals.values().copied().filter(|&t| t > 0).collect();
        if logged.is_empty() {
            return MonthStats::default();
        }
        MonthStats {
            logged_days: logged.len(),
            over_goal_days: logged.iter().filter(|&&t| t > self.goal).count(),
            average_calories: logged.iter().sum::<i32>() / logged.len() as i32,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyState {
    pub date: Option<NaiveDate>,
    pub target_calories: i32,
    pub actual_calories: i32,
    pub exceeded_calories: i32,
    pub meals: Vec<MealResponse>,
    pub loading: bool,
    /// Meal with a delete or update in flight
    pub busy_meal: Option<i64>,
    pub error: Option<String>,
}

impl DailyState {
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            ..Self::default()
        }
    }

    /// Recompute totals from the meals currently listed.
    pub fn recompute_totals(&mut self) {
        self.actual_calories = self.meals.iter().map(|m| m.total_calories).sum();
        self.exceeded_calories = shared::calories_over_goal(self.actual_calories, self.target_calories);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalState {
    pub current_goal: i32,
    pub input: String,
    pub saving: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CameraState {
    pub capturing: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecognitionState {
    pub image: Option<ImageToken>,
    pub foods: Vec<RecognizedFood>,
    /// Total as reported by the server
    pub server_total: i32,
    pub loading: bool,
    pub saving: bool,
    pub error: Option<String>,
}

impl RecognitionState {
    pub fn with_image(image: ImageToken) -> Self {
        Self {
            image: Some(image),
            ..Self::default()
        }
    }

    /// Sum of the rows on screen.
    pub fn displayed_total(&self) -> i32 {
        self.foods.iter().map(|f| f.calories).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualInputState {
    pub food_name: String,
    pub calories_input: String,
    pub searching: bool,
    pub saving: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminLoginState {
    pub username: String,
    pub password: String,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetPasswordForm {
    pub user_id: i64,
    pub new_password: String,
    pub confirm_password: String,
    pub saving: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserManagementState {
    pub users: Vec<UserManagementResponse>,
    pub loading: bool,
    /// User with a delete in flight
    pub busy_user: Option<i64>,
    pub reset: Option<ResetPasswordForm>,
    pub error: Option<String>,
    /// Success messages, shown apart from errors
    pub notice: Option<String>,
}

/// Main application state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub current_screen: Screen,
    /// Bumped on every navigation; results tagged with an older visit are dropped.
    pub visit: u64,
    pub login: LoginState,
    pub signup: SignUpState,
    pub calendar: CalendarState,
    pub daily: DailyState,
    pub goal: GoalState,
    pub camera: CameraState,
    pub recognition: RecognitionState,
    pub manual: ManualInputState,
    pub admin_login: AdminLoginState,
    pub users: UserManagementState,
    /// Signed-in administrator, if any
    pub admin: Option<AdminLoginResponse>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            current_screen: Screen::Login,
            visit: 0,
            login: LoginState::default(),
            signup: SignUpState::default(),
            calendar: CalendarState::default(),
            daily: DailyState::default(),
            goal: GoalState::default(),
            camera: CameraState::default(),
            recognition: RecognitionState::default(),
            manual: ManualInputState::default(),
            admin_login: AdminLoginState::default(),
            users: UserManagementState::default(),
            admin: None,
        }
    }
}

impl AppState {
    pub fn is_admin(&self) -> bool {
        self.admin.is_some()
    }

    /// Error string of the current screen, if it has one.
    pub fn current_error(&self) -> Option<&str> {
        let error = match self.current_screen {
            Screen::Login => &self.login.error,
            Screen::SignUp => &self.signup.error,
            Screen::Calendar => &self.calendar.error,
            Screen::DailyDetail => &self.daily.error,
            Screen::GoalSetting => &self.goal.error,
            Screen::Camera => &self.camera.error,
            Screen::Recognition => &self.recognition.error,
            Screen::ManualInput => &self.manual.error,
            Screen::AdminLogin => &self.admin_login.error,
            Screen::AdminDashboard => return None,
            Screen::UserManagement => &self.users.error,
        };
        error.as_deref()
    }

    /// Reset the transient state of a screen being left.
    pub fn reset_screen(&mut self, screen: Screen) {
        match screen {
            Screen::Login => self.login = LoginState::default(),
            Screen::SignUp => self.signup = SignUpState::default(),
            Screen::Calendar => {
                self.calendar.loading = false;
                self.calendar.error = None;
            }
            Screen::DailyDetail => {
                self.daily.loading = false;
                self.daily.busy_meal = None;
                self.daily.error = None;
            }
            Screen::GoalSetting => self.goal = GoalState::default(),
            Screen::Camera => self.camera = CameraState::default(),
            Screen::Recognition => self.recognition = RecognitionState::default(),
            Screen::ManualInput => self.manual = ManualInputState::default(),
            Screen::AdminLogin => self.admin_login = AdminLoginState::default(),
            Screen::AdminDashboard => {}
            Screen::UserManagement => self.users = UserManagementState::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_calendar_days_cover_the_month() {
        let mut calendar = CalendarState::default();
        calendar.show_month_of(date(2024, 2, 10));
        calendar.goal = 2000;
        calendar.daily_totals.insert(date(2024, 2, 3), 2500);
        calendar.daily_totals.insert(date(2024, 2, 4), 1500);

        let days = calendar.days();
        assert_eq!(days.len(), 29);
        assert_eq!(days[0].date, date(2024, 2, 1));
        assert!(days[2].over_goal);
        assert!(!days[3].over_goal);
        assert_eq!(days[4].total, None);
    }

    #[test]
    fn test_shift_month_crosses_year() {
        let mut calendar = CalendarState::default();
        calendar.show_month_of(date(2025, 1, 15));
        assert!(calendar.shift_month(-1));
        assert_eq!((calendar.year, calendar.month), (2024, 12));
        assert!(calendar.shift_month(1));
        assert_eq!((calendar.year, calendar.month), (2025, 1));
    }

    #[test]
    fn test_month_stats() {
        let mut calendar = CalendarState::default();
        calendar.show_month_of(date(2025, 3, 1));
        calendar.goal = 2000;
        calendar.daily_totals.insert(date(2025, 3, 1), 1800);
        calendar.daily_totals.insert(date(2025, 3, 2), 2400);
        calendar.daily_totals.insert(date(2025, 3, 3), 0);

        let stats = calendar.stats();
        assert_eq!(stats.logged_days, 2);
        assert_eq!(stats.over_goal_days, 1);
        assert_eq!(stats.average_calories, 2100);
    }

    #[test]
    fn test_back_targets() {
        assert_eq!(Screen::Recognition.parent(), Some(Screen::Camera));
        assert_eq!(Screen::GoalSetting.parent(), Some(Screen::Calendar));
        assert_eq!(Screen::Calendar.parent(), None);
        assert!(Screen::Camera.requires_session());
        assert!(!Screen::AdminLogin.requires_session());
        assert!(Screen::UserManagement.requires_admin());
    }
}
