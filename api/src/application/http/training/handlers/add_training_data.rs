use axum::extract::{Multipart, State};
use dish_recognition_core::domain::{
    dish::entities::DishCategory,
    training::{ports::TrainingService, value_objects::AddTrainingDataInput},
};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;
use validator::Validate;

use crate::application::http::{
    image_upload::{IMAGE_FIELD, read_image_field, read_text_field},
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
    training::validators::AddTrainingDataValidator,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DishInfo {
    pub dish_code: String,
    pub dish_desc: String,
    pub category: DishCategory,
    pub image_path: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AddTrainingDataResponse {
    pub success: bool,
    pub message: String,
    pub dish_info: DishInfo,
}

#[utoipa::path(
    post,
    path = "/add_training_data/",
    tag = "training",
    summary = "Add a labeled training image",
    description = "Stores the image in the training directory and registers a new dish. Fails when the dish code already exists or is malformed.",
    request_body(content_type = "multipart/form-data", description = "Form with `image`, `dish_code`, `dish_desc` and `category`"),
    responses(
        (status = 200, body = AddTrainingDataResponse),
        (status = 400, description = "Invalid form or duplicate dish code"),
        (status = 413, description = "Image too large")
    ),
)]
pub async fn add_training_data(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response<AddTrainingDataResponse>, ApiError> {
    let mut form = AddTrainingDataValidator::default();
    let mut image_data = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        error!("Failed to read multipart field: {}", e);
        ApiError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            IMAGE_FIELD => {
                image_data = Some(read_image_field(field, &state.upload_policy).await?);
            }
            "dish_code" => form.dish_code = read_text_field(field).await?.trim().to_string(),
            "dish_desc" => form.dish_desc = read_text_field(field).await?.trim().to_string(),
            "category" => form.category = read_text_field(field).await?.trim().to_string(),
            _ => {}
        }
    }

    let image_data = image_data.ok_or_else(|| {
        ApiError::BadRequest("Missing 'image' field in multipart form".to_string())
    })?;

    form.validate()
        .map_err(|e| ApiError::BadRequest(format!("Validation error: {}", e)))?;
    let category: DishCategory = form.category.parse()?;

    let sample = state
        .service
        .add_training_data(AddTrainingDataInput {
            dish_code: form.dish_code,
            dish_desc: form.dish_desc,
            category,
            image_data,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(AddTrainingDataResponse {
        success: true,
        message: "训练数据添加成功".to_string(),
        dish_info: DishInfo {
            dish_code: sample.dish.dish_code,
            dish_desc: sample.dish.dish_desc,
            category: sample.dish.category,
            image_path: sample.image_path,
        },
    }))
}
