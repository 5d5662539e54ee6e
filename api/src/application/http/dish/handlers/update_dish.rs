use axum::extract::{Path, State};
use dish_recognition_core::domain::dish::{
    entities::Dish, ports::DishService, value_objects::UpdateDishInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    dish::validators::UpdateDishValidator,
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct UpdateDishResponse {
    pub success: bool,
    pub message: String,
    pub dish: Dish,
}

#[utoipa::path(
    put,
    path = "/dishes/{dish_code}",
    tag = "dish",
    summary = "Update dish",
    description = "Replaces the description and/or category of an existing dish. Omitted fields keep their value.",
    params(
        ("dish_code" = String, Path, description = "Dish code"),
    ),
    request_body = UpdateDishValidator,
    responses(
        (status = 200, body = UpdateDishResponse),
        (status = 404, description = "Dish not found")
    ),
)]
pub async fn update_dish(
    Path(dish_code): Path<String>,
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<UpdateDishValidator>,
) -> Result<Response<UpdateDishResponse>, ApiError> {
    let dish = state
        .service
        .update_dish(UpdateDishInput {
            dish_code,
            dish_desc: payload.dish_desc,
            category: payload.category,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(UpdateDishResponse {
        success: true,
        message: "菜品更新成功".to_string(),
        dish,
    }))
}
