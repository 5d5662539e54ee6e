use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Text parts of the training-data form.
#[derive(Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct AddTrainingDataValidator {
    #[validate(length(min = 5, message = "dish_code must be at least 5 characters"))]
    pub dish_code: String,

    #[validate(length(min = 1, message = "dish_desc is required"))]
    pub dish_desc: String,

    #[validate(length(min = 1, message = "category is required"))]
    pub category: String,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct TrainModelValidator {
    /// Dataset description passed to the trainer; defaults to the training directory.
    #[serde(default)]
    pub data_path: Option<String>,

    #[serde(default)]
    #[validate(range(min = 1, message = "epochs must be at least 1"))]
    pub epochs: Option<u32>,
}
