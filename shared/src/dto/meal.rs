//! # Meal Data Transfer Objects
//!
//! Meals are created by the server from a [`MealRequest`] and come back as
//! [`MealResponse`]. A request carries 1 to 3 foods in fixed slots
//! (`food1Name`, `food1Calories`, ...).

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use super::food::{RecognizedFood, MAX_FOODS_PER_MEAL};

/// Meal-time bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MealCategory {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealCategory {
    /// All categories in display order
    pub fn all() -> &'static [MealCategory] {
        &[
            MealCategory::Breakfast,
            MealCategory::Lunch,
            MealCategory::Dinner,
            MealCategory::Snack,
        ]
    }

    /// Wire token
    pub fn token(&self) -> &'static str {
        match self {
            MealCategory::Breakfast => "BREAKFAST",
            MealCategory::Lunch => "LUNCH",
            MealCategory::Dinner => "DINNER",
            MealCategory::Snack => "SNACK",
        }
    }

    /// Localized label, as sent back in `mealTypeKorean`
    pub fn label(&self) -> &'static str {
        match self {
            MealCategory::Breakfast => "아침",
            MealCategory::Lunch => "점심",
            MealCategory::Dinner => "저녁",
            MealCategory::Snack => "간식",
        }
    }

    /// Category for a meal logged at `hour` (0-23).
    ///
    /// 0-10 breakfast, 11-15 lunch, 16-20 dinner, anything later is a snack.
    pub fn for_hour(hour: u32) -> Self {
        match hour {
            0..=10 => MealCategory::Breakfast,
            11..=15 => MealCategory::Lunch,
            16..=20 => MealCategory::Dinner,
            _ => MealCategory::Snack,
        }
    }

    /// Category for a meal logged at `time`.
    pub fn for_time(time: NaiveTime) -> Self {
        Self::for_hour(time.hour())
    }

    /// Parse a wire token (case-insensitive)
    pub fn from_token(token: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|c| c.token().eq_ignore_ascii_case(token))
    }
}

impl std::fmt::Display for MealCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Create/update meal request body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MealRequest {
    pub user_unique_code: String,
    pub meal_date: NaiveDate,
    pub meal_time: NaiveTime,
    pub meal_type: MealCategory,
    pub food_count: u8,
    pub food1_name: Option<String>,
    pub food1_calories: Option<i32>,
    pub food2_name: Option<String>,
    pub food2_calories: Option<i32>,
    pub food3_name: Option<String>,
    pub food3_calories: Option<i32>,
}

impl MealRequest {
    /// Build a request from 1 to 3 foods.
    ///
    /// The time is truncated to whole seconds.
    pub fn new(
        user_unique_code: impl Into<String>,
        meal_date: NaiveDate,
        meal_time: NaiveTime,
        meal_type: MealCategory,
        foods: &[RecognizedFood],
    ) -> Result<Self, Error> {
        if foods.is_empty() {
            return Err(Error::NoFoods);
        }
        if foods.len() > MAX_FOODS_PER_MEAL {
            return Err(Error::TooManyFoods(foods.len()));
        }

        let slot = |i: usize| foods.get(i).map(|f| (f.name.clone(), f.calories)).unzip();
        let (food1_name, food1_calories) = slot(0);
        let (food2_name, food2_calories) = slot(1);
        let (food3_name, food3_calories) = slot(2);

        Ok(Self {
            user_unique_code: user_unique_code.into(),
            meal_date,
            meal_time: meal_time.with_nanosecond(0).unwrap_or(meal_time),
            meal_type,
            food_count: foods.len() as u8,
            food1_name,
            food1_calories,
            food2_name,
            food2_calories,
            food3_name,
            food3_calories,
        })
    }
}

/// Full meal record as returned by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MealResponse {
    pub id: i64,
    pub meal_date: NaiveDate,
    pub meal_time: NaiveTime,
    pub meal_type: MealCategory,
    #[serde(default)]
    pub meal_type_korean: String,
    pub total_calories: i32,
    #[serde(default)]
    pub foods: Vec<FoodResponse>,
}

impl MealResponse {
    /// Foods of this meal as (name, calories) pairs, for resubmission.
    pub fn food_items(&self) -> Vec<RecognizedFood> {
        self.foods
            .iter()
            .map(|f| RecognizedFood {
                name: f.name.clone(),
                calories: f.calories,
            })
            .collect()
    }
}

/// Food inside a meal record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FoodResponse {
    pub id: i64,
    pub name: String,
    pub calories: i32,
    pub image_url: Option<String>,
}

// region:    --- Error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    NoFoods,
    TooManyFoods(usize),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::NoFoods => write!(fmt, "A meal needs at least one food"),
            Error::TooManyFoods(n) => {
                write!(fmt, "A meal holds at most {MAX_FOODS_PER_MEAL} foods (got {n})")
            }
        }
    }
}

impl std::error::Error for Error {}
// endregion: --- Error
