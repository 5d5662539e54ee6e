use axum::extract::{Multipart, State};
use dish_recognition_core::domain::detection::{
    entities::Detection, ports::RecognitionService, value_objects::RecognizeDishInput,
};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::http::{
    image_upload::{IMAGE_FIELD, read_image_field},
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RecognizeDishResponse {
    pub success: bool,
    pub message: String,
    pub results: Vec<Detection>,
    pub image_id: Uuid,
}

#[utoipa::path(
    post,
    path = "/recognize/",
    tag = "recognition",
    summary = "Recognize dishes in an image",
    description = "Stores the uploaded image, runs the detector on it and returns the dishes found. The result is appended to the detection history.",
    request_body(content_type = "multipart/form-data", description = "Form with an `image` file part"),
    responses(
        (status = 200, body = RecognizeDishResponse),
        (status = 400, description = "Missing or non-image upload"),
        (status = 413, description = "Image too large")
    ),
)]
pub async fn recognize_dish(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response<RecognizeDishResponse>, ApiError> {
    let mut image_data = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        error!("Failed to read multipart field: {}", e);
        ApiError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        if field.name() == Some(IMAGE_FIELD) {
            image_data = Some(read_image_field(field, &state.upload_policy).await?);
        }
    }

    let image_data = image_data.ok_or_else(|| {
        ApiError::BadRequest("Missing 'image' field in multipart form".to_string())
    })?;

    let outcome = state
        .service
        .recognize_dish(RecognizeDishInput { image_data })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(RecognizeDishResponse {
        success: true,
        message: "菜品识别成功".to_string(),
        results: outcome.results,
        image_id: outcome.image_id,
    }))
}
