use std::path::PathBuf;

use bytes::Bytes;

use crate::domain::dish::entities::DishCategory;

#[derive(Debug, Clone)]
pub struct AddTrainingDataInput {
    pub dish_code: String,
    pub dish_desc: String,
    pub category: DishCategory,
    pub image_data: Bytes,
}

#[derive(Debug, Clone, Default)]
pub struct TrainModelInput {
    pub data_path: Option<PathBuf>,
    pub epochs: Option<u32>,
}
