use super::handlers::get_detection_history::{__path_get_detection_history, get_detection_history};
use super::handlers::recognize_dish::{__path_recognize_dish, recognize_dish};
use crate::application::http::server::app_state::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(recognize_dish, get_detection_history))]
pub struct RecognitionApiDoc;

pub fn recognition_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/recognize/", state.args.server.root_path),
            post(recognize_dish),
        )
        .route(
            &format!("{}/detection_history/", state.args.server.root_path),
            get(get_detection_history),
        )
}
