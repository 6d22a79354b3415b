//! # CheckFood - Terminal Front End
//!
//! Line-oriented driver for the client: each command maps to one `App::handle_*`
//! action, and the current screen is printed whenever state changes.

use std::sync::Arc;

use chrono::NaiveDate;
use shared::MealCategory;
use tokio::io::{AsyncBufReadExt, BufReader};

use checkfood::app::{view, App, Screen, SignUpState};
use checkfood::capture::FileFrameSource;
use checkfood::config::ClientConfig;

const HELP: &str = "\
commands:
  login <email> <password>          signup <name> <email> <password> <confirm>
  calendar [next|prev]              day <YYYY-MM-DD>
  delete <meal id>                  category <meal id> <BREAKFAST|LUNCH|DINNER|SNACK>
  goal [kcal]                       camera
  capture <image path>              save | retake
  manual                            search <food name>
  add <calories> <food name>
  admin login <username> <password> admin users | admin logout
  admin delete <user id>            admin reset <user id>
  resetpw <new> <confirm>           cancel
  back | logout | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Login(String, String),
    SignUp(SignUpState),
    Calendar(i32),
    Day(NaiveDate),
    DeleteMeal(i64),
    Category(i64, MealCategory),
    Goal(Option<String>),
    Camera,
    Capture(String),
    Save,
    Retake,
    Manual,
    Search(String),
    Add(String, String),
    AdminLogin(String, String),
    AdminUsers,
    AdminLogout,
    DeleteUser(i64),
    BeginReset(i64),
    SubmitReset(String, String),
    CancelReset,
    Back,
    Logout,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let id = |raw: Option<&&str>| -> Result<i64, String> {
        raw.and_then(|s| s.parse().ok()).ok_or_else(|| "expected a numeric id".to_string())
    };

    let command = match words.as_slice() {
        ["login", email, password] => Command::Login(email.to_string(), password.to_string()),
        ["signup", name, email, password, confirm] => Command::SignUp(SignUpState {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
            terms_accepted: true,
            privacy_accepted: true,
            ..SignUpState::default()
        }),
        ["calendar"] => Command::Calendar(0),
        ["calendar", "next"] => Command::Calendar(1),
        ["calendar", "prev"] => Command::Calendar(-1),
        ["day", date] => Command::Day(
            NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| format!("bad date {date}: {e}"))?,
        ),
        ["delete", _] => Command::DeleteMeal(id(words.get(1))?),
        ["category", _, token] => Command::Category(
            id(words.get(1))?,
            MealCategory::from_token(token).ok_or_else(|| format!("unknown category {token}"))?,
        ),
        ["goal"] => Command::Goal(None),
        ["goal", kcal] => Command::Goal(Some(kcal.to_string())),
        ["camera"] => Command::Camera,
        ["capture", path] => Command::Capture(path.to_string()),
        ["save"] => Command::Save,
        ["retake"] => Command::Retake,
        ["manual"] => Command::Manual,
        ["search", name @ ..] if !name.is_empty() => Command::Search(name.join(" ")),
        ["add", calories, name @ ..] if !name.is_empty() => Command::Add(name.join(" "), calories.to_string()),
        ["admin", "login", username, password] => Command::AdminLogin(username.to_string(), password.to_string()),
        ["admin", "users"] => Command::AdminUsers,
        ["admin", "logout"] => Command::AdminLogout,
        ["admin", "delete", _] => Command::DeleteUser(id(words.get(2))?),
        ["admin", "reset", _] => Command::BeginReset(id(words.get(2))?),
        ["resetpw", new_password, confirm] => Command::SubmitReset(new_password.to_string(), confirm.to_string()),
        ["cancel"] => Command::CancelReset,
        ["back"] => Command::Back,
        ["logout"] => Command::Logout,
        ["help"] => Command::Help,
        ["quit"] | ["exit"] => Command::Quit,
        _ => return Err(format!("unknown command: {line}")),
    };
    Ok(command)
}

async fn apply(app: &mut App, frames: &FileFrameSource, command: Command) {
    match command {
        Command::Login(email, password) => app.handle_login_click(email, password),
        Command::SignUp(form) => {
            app.handle_navigate(Screen::SignUp);
            app.handle_signup_click(form);
        }
        Command::Calendar(0) => app.handle_navigate(Screen::Calendar),
        Command::Calendar(delta) => app.handle_month_change(delta),
        Command::Day(date) => app.handle_day_select(date),
        Command::DeleteMeal(meal_id) => app.handle_delete_meal(meal_id),
        Command::Category(meal_id, category) => app.handle_change_meal_category(meal_id, category),
        Command::Goal(None) => app.handle_navigate(Screen::GoalSetting),
        Command::Goal(Some(input)) => {
            if app.current_screen() != Screen::GoalSetting {
                app.handle_navigate(Screen::GoalSetting);
            }
            app.handle_goal_submit(input);
        }
        Command::Camera => app.handle_navigate(Screen::Camera),
        Command::Capture(path) => match frames.load(&path).await {
            Ok(()) => app.handle_capture(),
            Err(e) => println!("! {e}"),
        },
        Command::Save => app.handle_save_recognized_meal(),
        Command::Retake => app.handle_retake(),
        Command::Manual => app.handle_navigate(Screen::ManualInput),
        Command::Search(name) => app.handle_food_search(name),
        Command::Add(name, calories) => app.handle_add_manual_meal(name, calories),
        Command::AdminLogin(username, password) => {
            app.handle_navigate(Screen::AdminLogin);
            app.handle_admin_login_click(username, password);
        }
        Command::AdminUsers => app.handle_navigate(Screen::UserManagement),
        Command::AdminLogout => app.handle_admin_logout(),
        Command::DeleteUser(user_id) => app.handle_delete_user(user_id),
        Command::BeginReset(user_id) => app.handle_begin_password_reset(user_id),
        Command::SubmitReset(new_password, confirm) => app.handle_submit_password_reset(new_password, confirm),
        Command::CancelReset => app.handle_cancel_password_reset(),
        Command::Back => app.handle_back(),
        Command::Logout => app.handle_sign_out(),
        Command::Help | Command::Quit => {}
    }
}

fn print_screen(app: &App) {
    let text = {
        let state = app.state.read();
        view::render(&state, &app.session())
    };
    println!("{text}");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = checkfood::debug::init();

    let config = ClientConfig::from_env()?;
    tracing::info!(base_url = %config.api_base_url, cache_dir = %config.cache_dir.display(), "Starting CheckFood client");

    let frames = Arc::new(FileFrameSource::new());
    let mut app = App::new(&config, frames.clone())?;

    println!("{HELP}\n");
    print_screen(&app);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match parse_command(&line) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Help) => println!("{HELP}"),
                    Ok(command) => {
                        apply(&mut app, &frames, command).await;
                        print_screen(&app);
                    }
                    Err(e) => println!("! {e}"),
                }
            }
            alive = app.process_next_event() => {
                if !alive {
                    break;
                }
                app.on_tick();
                print_screen(&app);
            }
        }
    }

    tracing::info!("CheckFood client exiting");
    Ok(())
}
