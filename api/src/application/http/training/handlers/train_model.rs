use std::path::PathBuf;

use axum::extract::State;
use dish_recognition_core::domain::training::{
    ports::TrainingService, value_objects::TrainModelInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
    training::validators::TrainModelValidator,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct TrainModelResponse {
    pub success: bool,
    pub message: String,
    pub data_path: String,
    pub epochs: u32,
}

#[utoipa::path(
    post,
    path = "/train/",
    tag = "training",
    summary = "Train the detection model",
    description = "Runs the external trainer to completion. Reports `success: false` when no model is loaded or the trainer fails.",
    request_body = TrainModelValidator,
    responses(
        (status = 200, body = TrainModelResponse),
        (status = 400, description = "Invalid training options")
    ),
)]
pub async fn train_model(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<TrainModelValidator>,
) -> Result<Response<TrainModelResponse>, ApiError> {
    let run = state
        .service
        .train_model(TrainModelInput {
            data_path: payload.data_path.map(PathBuf::from),
            epochs: payload.epochs,
        })
        .await
        .map_err(ApiError::from)?;

    let message = if run.success {
        "模型训练完成"
    } else {
        "模型训练失败"
    };

    Ok(Response::OK(TrainModelResponse {
        success: run.success,
        message: message.to_string(),
        data_path: run.data_path,
        epochs: run.epochs,
    }))
}
