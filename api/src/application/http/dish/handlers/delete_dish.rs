use axum::extract::{Path, State};
use dish_recognition_core::domain::dish::ports::DishService;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DeleteDishResponse {
    pub success: bool,
    pub message: String,
}

#[utoipa::path(
    delete,
    path = "/dishes/{dish_code}",
    tag = "dish",
    summary = "Delete dish",
    params(
        ("dish_code" = String, Path, description = "Dish code"),
    ),
    responses(
        (status = 200, body = DeleteDishResponse),
        (status = 404, description = "Dish not found")
    ),
)]
pub async fn delete_dish(
    Path(dish_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response<DeleteDishResponse>, ApiError> {
    state
        .service
        .delete_dish(dish_code)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(DeleteDishResponse {
        success: true,
        message: "菜品删除成功".to_string(),
    }))
}
