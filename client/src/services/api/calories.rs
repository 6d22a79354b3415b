//! # Calorie Summary Endpoints

use chrono::NaiveDate;
use shared::{DailyCalorieResponse, MonthlyCalorieResponse};

use super::client::ApiClient;
use crate::core::error::ApiError;

/// Wire format for dates in paths.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Per-day totals for one month.
#[tracing::instrument(skip(client))]
pub async fn monthly_calories(
    client: &ApiClient,
    unique_code: &str,
    year: i32,
    month: u32,
) -> Result<MonthlyCalorieResponse, ApiError> {
    let (year, month) = (year.to_string(), month.to_string());
    let url = client.url(&["calories", "monthly", unique_code, &year, &month])?;
    let summary: MonthlyCalorieResponse = client
        .send_for_data("calories/monthly", client.client.get(url))
        .await?;

    tracing::debug!(days = summary.daily_calories.len(), "Monthly summary loaded");
    Ok(summary)
}

/// Target, actual, and meals for a single day.
#[tracing::instrument(skip(client))]
pub async fn daily_calories(
    client: &ApiClient,
    unique_code: &str,
    date: NaiveDate,
) -> Result<DailyCalorieResponse, ApiError> {
    let date = date.format(DATE_FORMAT).to_string();
    let url = client.url(&["calories", "daily", unique_code, &date])?;
    let detail: DailyCalorieResponse = client
        .send_for_data("calories/daily", client.client.get(url))
        .await?;

    tracing::debug!(meals = detail.meals.len(), actual = detail.actual_calories, "Daily detail loaded");
    Ok(detail)
}
