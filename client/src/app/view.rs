//! # Text View
//!
//! Renders the current screen of an [`AppState`] as plain text for the
//! terminal front end. Reads state only; every action goes through `App::handle_*`.

use std::fmt::Write;

use chrono::Datelike;
use shared::{format_kcal, goal_progress};

use crate::app::state::{AppState, Screen};
use crate::session::Session;

/// Render the current screen.
pub fn render(state: &AppState, session: &Session) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", state.current_screen.title());

    match state.current_screen {
        Screen::Login => render_login(&mut out, state),
        Screen::SignUp => render_signup(&mut out, state),
        Screen::Calendar => render_calendar(&mut out, state, session),
        Screen::DailyDetail => render_daily(&mut out, state),
        Screen::GoalSetting => render_goal(&mut out, state),
        Screen::Camera => render_camera(&mut out, state),
        Screen::Recognition => render_recognition(&mut out, state),
        Screen::ManualInput => render_manual(&mut out, state),
        Screen::AdminLogin => render_admin_login(&mut out, state),
        Screen::AdminDashboard => render_admin_dashboard(&mut out, state),
        Screen::UserManagement => render_users(&mut out, state),
    }

    if let Some(error) = state.current_error() {
        let _ = writeln!(out, "! {error}");
    }
    out
}

fn busy_line(out: &mut String, busy: bool, label: &str) {
    if busy {
        let _ = writeln!(out, "... {label}");
    }
}

fn render_login(out: &mut String, state: &AppState) {
    busy_line(out, state.login.loading, "Signing in");
    let _ = writeln!(out, "login <email> <password> | signup | admin login");
}

fn render_signup(out: &mut String, state: &AppState) {
    busy_line(out, state.signup.loading, "Creating account");
    let _ = writeln!(out, "signup <name> <email> <password> <confirm>  (accepts terms and privacy)");
}

fn render_calendar(out: &mut String, state: &AppState, session: &Session) {
    let calendar = &state.calendar;
    let _ = writeln!(
        out,
        "{} | {}-{:02} | goal {}",
        session.name,
        calendar.year,
        calendar.month,
        format_kcal(calendar.goal)
    );
    busy_line(out, calendar.loading, "Loading month");

    for day in calendar.days() {
        let total = match day.total {
            Some(total) => format_kcal(total),
            None => "-".to_string(),
        };
        let marker = if day.over_goal { " over" } else { "" };
        let weekday = day.date.format("%a").to_string();
        let _ = writeln!(out, "{:>2} {weekday:<4} {total}{marker}", day.date.day());
    }

    let stats = calendar.stats();
    if stats.logged_days > 0 {
        let _ = writeln!(
            out,
            "logged {} days, {} over goal, average {}",
            stats.logged_days,
            stats.over_goal_days,
            format_kcal(stats.average_calories)
        );
    }
}

fn render_daily(out: &mut String, state: &AppState) {
    let daily = &state.daily;
    if let Some(date) = daily.date {
        let _ = writeln!(out, "{date}");
    }
    busy_line(out, daily.loading, "Loading meals");

    let _ = writeln!(
        out,
        "{} / {} ({:.0}%)",
        format_kcal(daily.actual_calories),
        format_kcal(daily.target_calories),
        goal_progress(daily.actual_calories, daily.target_calories) * 100.0
    );
    if daily.exceeded_calories > 0 {
        let _ = writeln!(out, "over by {}", format_kcal(daily.exceeded_calories));
    }

    for meal in &daily.meals {
        let busy = if daily.busy_meal == Some(meal.id) { " ..." } else { "" };
        let _ = writeln!(
            out,
            "#{} {} {} {}{busy}",
            meal.id,
            meal.meal_time.format("%H:%M"),
            meal.meal_type.label(),
            format_kcal(meal.total_calories)
        );
        for food in &meal.foods {
            let _ = writeln!(out, "    {} {}", food.name, format_kcal(food.calories));
        }
    }
}

fn render_goal(out: &mut String, state: &AppState) {
    let _ = writeln!(out, "current {}", format_kcal(state.goal.current_goal));
    busy_line(out, state.goal.saving, "Saving");
}

fn render_camera(out: &mut String, state: &AppState) {
    busy_line(out, state.camera.capturing, "Capturing");
    let _ = writeln!(out, "capture <image path> | manual");
}

fn render_recognition(out: &mut String, state: &AppState) {
    let recognition = &state.recognition;
    if let Some(image) = &recognition.image {
        let _ = writeln!(out, "image {image}");
    }
    busy_line(out, recognition.loading, "Recognizing");
    busy_line(out, recognition.saving, "Saving meal");

    for (i, food) in recognition.foods.iter().enumerate() {
        let _ = writeln!(out, "{}. {} {}", i + 1, food.name, format_kcal(food.calories));
    }
    if !recognition.foods.is_empty() {
        let _ = writeln!(out, "total {}", format_kcal(recognition.displayed_total()));
    }
}

fn render_manual(out: &mut String, state: &AppState) {
    let manual = &state.manual;
    let _ = writeln!(out, "food: {}", manual.food_name);
    let _ = writeln!(out, "calories: {}", manual.calories_input);
    busy_line(out, manual.searching, "Searching");
    busy_line(out, manual.saving, "Saving meal");
}

fn render_admin_login(out: &mut String, state: &AppState) {
    busy_line(out, state.admin_login.loading, "Signing in");
}

fn render_admin_dashboard(out: &mut String, state: &AppState) {
    if let Some(admin) = &state.admin {
        let _ = writeln!(out, "signed in as {}", admin.username);
    }
    let _ = writeln!(out, "users | logout");
}

fn render_users(out: &mut String, state: &AppState) {
    let users = &state.users;
    busy_line(out, users.loading, "Loading users");
    if let Some(notice) = &users.notice {
        let _ = writeln!(out, "* {notice}");
    }

    for user in &users.users {
        let busy = if users.busy_user == Some(user.user_id) { " ..." } else { "" };
        let _ = writeln!(
            out,
            "#{} {} <{}> {} goal {}{busy}",
            user.user_id,
            user.name,
            user.email,
            user.unique_code,
            format_kcal(user.daily_calorie_goal)
        );
    }

    if let Some(form) = &users.reset {
        let _ = writeln!(out, "resetting password for #{}", form.user_id);
        busy_line(out, form.saving, "Saving");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_calendar_marks_days_over_goal() {
        let mut state = AppState::default();
        state.current_screen = Screen::Calendar;
        state.calendar.show_month_of(NaiveDate::from_ymd_opt(2025, 11, 1).unwrap());
        state.calendar.goal = 2000;
        state.calendar.daily_totals.insert(NaiveDate::from_ymd_opt(2025, 11, 3).unwrap(), 2400);

        let text = render(&state, &Session::default());
        assert!(text.starts_with("== Calorie Calendar =="));
        assert!(text.contains(" 3 Mon  2,400 kcal over"));
        assert!(text.contains("logged 1 days, 1 over goal"));
    }

    #[test]
    fn test_error_is_shown_last() {
        let mut state = AppState::default();
        state.login.error = Some("Invalid email or password".into());

        let text = render(&state, &Session::default());
        assert!(text.trim_end().ends_with("! Invalid email or password"));
    }
}
