//! # Calorie Aggregates
//!
//! Payloads of `calories/monthly/{code}/{year}/{month}` and `calories/daily/{code}/{date}`.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::meal::MealResponse;

/// One month of per-day totals plus the goal in effect.
///
/// Days without any meal are absent from `daily_calories`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCalorieResponse {
    pub year: i32,
    pub month: u32,
    pub target_calories: i32,
    #[serde(default)]
    pub daily_calories: BTreeMap<NaiveDate, i32>,
}

/// One day: goal, consumed, excess over goal, and the meals behind the total.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyCalorieResponse {
    pub date: NaiveDate,
    pub target_calories: i32,
    pub actual_calories: i32,
    pub exceeded_calories: i32,
    #[serde(default)]
    pub meals: Vec<MealResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_map_keys_parse_as_dates() {
        let body = r#"{"year":2025,"month":11,"targetCalories":2000,
            "dailyCalories":{"2025-11-07":1650,"2025-11-01":2300}}"#;
        let monthly: MonthlyCalorieResponse = serde_json::from_str(body).unwrap();
        let first = NaiveDate::from_ymd_opt(2025, 11, 1).unwrap();
        assert_eq!(monthly.daily_calories.get(&first), Some(&2300));
        // BTreeMap keeps the days in calendar order
        assert_eq!(monthly.daily_calories.keys().next(), Some(&first));
    }
}
