use super::handlers::health_check::{__path_health_check, health_check};
use super::handlers::root::{__path_root, root};
use crate::application::http::server::app_state::AppState;

use axum::{Router, routing::get};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(root, health_check))]
pub struct HealthApiDoc;

pub fn health_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;
    let index = if root_path.is_empty() {
        "/".to_string()
    } else {
        root_path.clone()
    };

    Router::new()
        .route(&index, get(root))
        .route(&format!("{}/health/", root_path), get(health_check))
}
