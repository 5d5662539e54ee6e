use axum::extract::{Path, State};
use dish_recognition_core::domain::dish::{entities::Dish, ports::DishService};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetDishResponse {
    pub success: bool,
    pub dish: Dish,
}

#[utoipa::path(
    get,
    path = "/dishes/{dish_code}",
    tag = "dish",
    summary = "Get dish",
    params(
        ("dish_code" = String, Path, description = "Dish code"),
    ),
    responses(
        (status = 200, body = GetDishResponse),
        (status = 404, description = "Dish not found")
    ),
)]
pub async fn get_dish(
    Path(dish_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response<GetDishResponse>, ApiError> {
    let dish = state
        .service
        .get_dish(dish_code)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetDishResponse {
        success: true,
        dish,
    }))
}
