use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::dish::entities::Dish;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TrainingSample {
    pub dish: Dish,
    pub image_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TrainingRun {
    pub success: bool,
    pub data_path: String,
    pub epochs: u32,
}
