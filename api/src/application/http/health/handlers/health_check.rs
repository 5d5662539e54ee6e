use axum::extract::State;
use dish_recognition_core::domain::health::{entities::HealthStatus, ports::HealthCheckService};

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[utoipa::path(
    get,
    path = "/health/",
    tag = "health",
    summary = "Liveness check",
    description = "Always reports `healthy`; `detector_mode` tells whether a model is loaded.",
    responses(
        (status = 200, body = HealthStatus)
    ),
)]
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Response<HealthStatus>, ApiError> {
    Ok(Response::OK(state.service.health()))
}
