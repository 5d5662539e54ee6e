use axum::extract::State;
use dish_recognition_core::domain::detection::{
    entities::DetectionRecord, ports::RecognitionService,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DetectionHistoryResponse {
    pub success: bool,
    /// Recognitions recorded since start-up.
    pub count: usize,
    /// The 20 most recent records, oldest first.
    pub history: Vec<DetectionRecord>,
}

#[utoipa::path(
    get,
    path = "/detection_history/",
    tag = "recognition",
    summary = "Recent recognitions",
    responses(
        (status = 200, body = DetectionHistoryResponse)
    ),
)]
pub async fn get_detection_history(
    State(state): State<AppState>,
) -> Result<Response<DetectionHistoryResponse>, ApiError> {
    let history = state
        .service
        .get_detection_history()
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(DetectionHistoryResponse {
        success: true,
        count: history.total,
        history: history.entries,
    }))
}
