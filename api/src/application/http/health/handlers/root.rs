use dish_recognition_core::domain::common::SERVICE_VERSION;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::api_entities::{api_error::ApiError, response::Response};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    summary = "Welcome message",
    responses(
        (status = 200, body = RootResponse)
    ),
)]
pub async fn root() -> Result<Response<RootResponse>, ApiError> {
    Ok(Response::OK(RootResponse {
        message: "欢迎使用食堂菜品AI识别系统!".to_string(),
        version: SERVICE_VERSION.to_string(),
    }))
}
