use axum::extract::State;
use dish_recognition_core::domain::dish::{
    entities::Dish, ports::DishService, value_objects::CreateDishInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    dish::validators::CreateDishValidator,
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CreateDishResponse {
    pub success: bool,
    pub message: String,
    pub dish: Dish,
}

#[utoipa::path(
    post,
    path = "/dish/",
    tag = "dish",
    summary = "Create dish",
    description = "Adds a dish to the catalog without a training image.",
    request_body = CreateDishValidator,
    responses(
        (status = 201, body = CreateDishResponse),
        (status = 400, description = "Invalid body or duplicate dish code")
    ),
)]
pub async fn create_dish(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<CreateDishValidator>,
) -> Result<Response<CreateDishResponse>, ApiError> {
    let dish = state
        .service
        .create_dish(CreateDishInput {
            dish_code: payload.dish_code,
            dish_desc: payload.dish_desc,
            category: payload.category,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(CreateDishResponse {
        success: true,
        message: "菜品添加成功".to_string(),
        dish,
    }))
}
