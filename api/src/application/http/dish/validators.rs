use dish_recognition_core::domain::dish::entities::DishCategory;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateDishValidator {
    #[validate(length(min = 5, message = "dish_code must be at least 5 characters"))]
    pub dish_code: String,

    #[validate(length(min = 1, message = "dish_desc cannot be empty"))]
    pub dish_desc: String,

    pub category: DishCategory,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateDishValidator {
    #[serde(default)]
    #[validate(length(min = 1, message = "dish_desc cannot be empty"))]
    pub dish_desc: Option<String>,

    #[serde(default)]
    pub category: Option<DishCategory>,
}
