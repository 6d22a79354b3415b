//! # Meal Endpoints

use chrono::NaiveDate;
use shared::{MealRequest, MealResponse};

use super::calories::DATE_FORMAT;
use super::client::ApiClient;
use crate::core::error::ApiError;

#[tracing::instrument(skip(client, request), fields(meal_type = %request.meal_type.token(), food_count = request.food_count))]
pub async fn create_meal(client: &ApiClient, request: MealRequest) -> Result<MealResponse, ApiError> {
    let builder = client.client.post(client.url(&["meals"])?).json(&request);
    let meal: MealResponse = client.send_for_data("meals/create", builder).await?;

    tracing::info!(meal_id = meal.id, total_calories = meal.total_calories, "Meal saved");
    Ok(meal)
}

#[tracing::instrument(skip(client, request), fields(meal_type = %request.meal_type.token()))]
pub async fn update_meal(
    client: &ApiClient,
    meal_id: i64,
    request: MealRequest,
) -> Result<MealResponse, ApiError> {
    let id = meal_id.to_string();
    let builder = client.client.put(client.url(&["meals", &id])?).json(&request);

    client.send_for_data("meals/update", builder).await
}

#[tracing::instrument(skip(client))]
pub async fn delete_meal(client: &ApiClient, meal_id: i64) -> Result<String, ApiError> {
    let id = meal_id.to_string();
    let builder = client.client.delete(client.url(&["meals", &id])?);
    client.send_for_message("meals/delete", builder).await
}

#[tracing::instrument(skip(client))]
pub async fn get_meal(client: &ApiClient, meal_id: i64) -> Result<MealResponse, ApiError> {
    let id = meal_id.to_string();
    let builder = client.client.get(client.url(&["meals", &id])?);
    client.send_for_data("meals/get", builder).await
}

/// Every meal the user logged on `date`.
#[tracing::instrument(skip(client))]
pub async fn meals_by_date(
    client: &ApiClient,
    unique_code: &str,
    date: NaiveDate,
) -> Result<Vec<MealResponse>, ApiError> {
    let date = date.format(DATE_FORMAT).to_string();
    let url = client.url(&["meals", "user", unique_code, "date", &date])?;
    client.send_for_data("meals/by-date", client.client.get(url)).await
}
