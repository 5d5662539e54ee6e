use axum::extract::State;
use dish_recognition_core::domain::dish::{entities::Dish, ports::DishService};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetDishesResponse {
    pub success: bool,
    pub count: usize,
    pub dishes: Vec<Dish>,
}

#[utoipa::path(
    get,
    path = "/dishes/",
    tag = "dish",
    summary = "List dishes",
    description = "Returns every dish in the catalog, ordered by dish code. The same listing is served for POST.",
    responses(
        (status = 200, body = GetDishesResponse)
    ),
)]
pub async fn get_dishes(
    State(state): State<AppState>,
) -> Result<Response<GetDishesResponse>, ApiError> {
    let dishes = state.service.get_dishes().await.map_err(ApiError::from)?;

    Ok(Response::OK(GetDishesResponse {
        success: true,
        count: dishes.len(),
        dishes,
    }))
}
