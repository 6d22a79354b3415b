//! # Food Recognition and Search
//!
//! `food/recognize` is a multipart upload. Unlike every other payload its
//! fields are snake_case (`food1_name`, `total_calories`).

use serde::{Deserialize, Serialize};

/// Multipart part carrying the image file.
pub const RECOGNIZE_IMAGE_PART: &str = "image";
/// Multipart part carrying the user's unique code as text.
pub const RECOGNIZE_USER_CODE_PART: &str = "userUniqueCode";
/// Largest image the server accepts (10 MiB).
pub const MAX_RECOGNITION_IMAGE_BYTES: usize = 10 * 1024 * 1024;
/// A meal and a recognition result hold at most this many foods.
pub const MAX_FOODS_PER_MEAL: usize = 3;

/// Recognition payload: up to three (name, calories) pairs and a total.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FoodRecognitionResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub food_count: u8,
    pub food1_name: Option<String>,
    pub food1_calories: Option<i32>,
    pub food2_name: Option<String>,
    pub food2_calories: Option<i32>,
    pub food3_name: Option<String>,
    pub food3_calories: Option<i32>,
    #[serde(default)]
    pub total_calories: i32,
}

/// One recognized food, ready for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecognizedFood {
    pub name: String,
    pub calories: i32,
}

impl FoodRecognitionResponse {
    /// Collect the filled slots, in slot order, capped at `food_count`.
    ///
    /// A slot counts only when both its name and calories are present.
    pub fn foods(&self) -> Vec<RecognizedFood> {
        let slots = [
            (&self.food1_name, self.food1_calories),
            (&self.food2_name, self.food2_calories),
            (&self.food3_name, self.food3_calories),
        ];
        slots
            .into_iter()
            .filter_map(|(name, calories)| match (name, calories) {
                (Some(name), Some(calories)) => Some(RecognizedFood {
                    name: name.clone(),
                    calories,
                }),
                _ => None,
            })
            .take(self.food_count as usize)
            .collect()
    }
}

/// Calorie lookup by food name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FoodSearchResponse {
    pub food_name: String,
    pub calories: i32,
}
