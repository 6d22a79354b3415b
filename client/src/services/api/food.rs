//! # Food Endpoints
//!
//! Image recognition (multipart upload) and name search.

use reqwest::multipart::{Form, Part};
use shared::{FoodRecognitionResponse, FoodSearchResponse, RECOGNIZE_IMAGE_PART, RECOGNIZE_USER_CODE_PART};

use super::client::ApiClient;
use crate::core::error::ApiError;

/// A JPEG image ready to be uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

/// Upload a meal photo and get back up to three recognized foods.
#[tracing::instrument(skip(client, image), fields(file_name = %image.file_name, size = image.bytes.len()))]
pub async fn recognize_food(
    client: &ApiClient,
    unique_code: &str,
    image: ImageUpload,
) -> Result<FoodRecognitionResponse, ApiError> {
    tracing::info!("Uploading image for recognition");

    let part = Part::bytes(image.bytes)
        .file_name(image.file_name)
        .mime_str("image/jpeg")
        .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
    let form = Form::new()
        .part(RECOGNIZE_IMAGE_PART, part)
        .text(RECOGNIZE_USER_CODE_PART, unique_code.to_string());

    let builder = client.client.post(client.url(&["food", "recognize"])?).multipart(form);
    let recognition: FoodRecognitionResponse = client.send_for_data("food/recognize", builder).await?;

    tracing::info!(
        food_count = recognition.food_count,
        total_calories = recognition.total_calories,
        "Recognition complete"
    );
    Ok(recognition)
}

/// Look up calories for a food by name.
#[tracing::instrument(skip(client))]
pub async fn search_food(client: &ApiClient, food_name: &str) -> Result<FoodSearchResponse, ApiError> {
    let builder = client
        .client
        .get(client.url(&["food", "search"])?)
        .query(&[("foodName", food_name)]);

    client.send_for_data("food/search", builder).await
}
