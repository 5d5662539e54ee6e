use super::handlers::add_training_data::{__path_add_training_data, add_training_data};
use super::handlers::train_model::{__path_train_model, train_model};
use crate::application::http::server::app_state::AppState;

use axum::{Router, routing::post};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(add_training_data, train_model))]
pub struct TrainingApiDoc;

pub fn training_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/add_training_data/", state.args.server.root_path),
            post(add_training_data),
        )
        .route(
            &format!("{}/train/", state.args.server.root_path),
            post(train_model),
        )
}
