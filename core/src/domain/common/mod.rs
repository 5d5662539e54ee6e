use std::path::PathBuf;

use chrono::Local;
use uuid::Uuid;

pub mod entities;
pub mod services;

pub const SERVICE_NAME: &str = "dish_recognition_api";
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Clone, Debug)]
pub struct DishRecognitionConfig {
    pub storage: StorageConfig,
    pub detector: DetectorConfig,
}

#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub models_dir: PathBuf,
    pub uploads_dir: PathBuf,
    pub training_dir: PathBuf,
    pub catalog_path: PathBuf,
    pub history_capacity: usize,
}

#[derive(Clone, Debug)]
pub struct DetectorConfig {
    pub model_path: PathBuf,
    pub fallback_model_path: PathBuf,
    pub labels_path: Option<PathBuf>,
    pub input_size: u32,
    pub conf_threshold: f32,
    pub iou_threshold: f32,
    pub max_detections: usize,
    pub train_weights: PathBuf,
    pub train_project_dir: PathBuf,
    pub train_epochs: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            models_dir: PathBuf::from("models"),
            uploads_dir: PathBuf::from("uploads"),
            training_dir: PathBuf::from("data/training"),
            catalog_path: PathBuf::from("data/dish_database.json"),
            history_capacity: 100,
        }
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("models/yolov10n_dish.onnx"),
            fallback_model_path: PathBuf::from("models/yolov10n.onnx"),
            labels_path: None,
            input_size: 640,
            conf_threshold: 0.5,
            iou_threshold: 0.5,
            max_detections: 10,
            train_weights: PathBuf::from("yolov10n.pt"),
            train_project_dir: PathBuf::from("runs/train"),
            train_epochs: 100,
        }
    }
}

pub fn generate_uuid_v4() -> Uuid {
    Uuid::new_v4()
}

/// Local wall-clock stamp used in stored image file names, e.g. `20250101_093000`.
pub fn file_timestamp() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}

pub fn round_to(value: f32, decimals: i32) -> f32 {
    let factor = 10f32.powi(decimals);
    (value * factor).round() / factor
}
