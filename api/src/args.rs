use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser};
use dish_recognition_core::domain::{
    common::{DetectorConfig, DishRecognitionConfig, StorageConfig},
    storage::policies::UploadPolicy,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "dish-recognition-api", version, about = "Dish recognition HTTP API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub storage: StorageArgs,

    #[command(flatten)]
    pub detector: DetectorArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Prefix prepended to every route, e.g. `/api`.
    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    /// Empty means any origin.
    #[arg(long, env = "ALLOWED_ORIGINS", value_delimiter = ',')]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct StorageArgs {
    #[arg(long, env = "DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    #[arg(long, env = "MODELS_DIR", default_value = "models")]
    pub models_dir: PathBuf,

    #[arg(long, env = "UPLOADS_DIR", default_value = "uploads")]
    pub uploads_dir: PathBuf,

    #[arg(long, env = "TRAINING_DIR", default_value = "data/training")]
    pub training_dir: PathBuf,

    #[arg(long, env = "CATALOG_PATH", default_value = "data/dish_database.json")]
    pub catalog_path: PathBuf,

    #[arg(long, env = "MAX_UPLOAD_SIZE", default_value_t = 10 * 1024 * 1024)]
    pub max_upload_size: usize,

    #[arg(
        long,
        env = "ALLOWED_EXTENSIONS",
        value_delimiter = ',',
        default_value = "jpg,jpeg,png,bmp,webp"
    )]
    pub allowed_extensions: Vec<String>,

    #[arg(long, env = "HISTORY_CAPACITY", default_value_t = 100)]
    pub history_capacity: usize,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct DetectorArgs {
    #[arg(long, env = "MODEL_PATH", default_value = "models/yolov10n_dish.onnx")]
    pub model_path: PathBuf,

    #[arg(long, env = "FALLBACK_MODEL_PATH", default_value = "models/yolov10n.onnx")]
    pub fallback_model_path: PathBuf,

    /// One class name per line, indexed by class id.
    #[arg(long, env = "LABELS_PATH")]
    pub labels_path: Option<PathBuf>,

    #[arg(long, env = "CONF_THRESHOLD", default_value_t = 0.5)]
    pub conf_threshold: f32,

    #[arg(long, env = "IOU_THRESHOLD", default_value_t = 0.5)]
    pub iou_threshold: f32,

    #[arg(long, env = "MAX_DETECTIONS", default_value_t = 10)]
    pub max_detections: usize,

    #[arg(long, env = "INPUT_SIZE", default_value_t = 640)]
    pub input_size: u32,

    #[arg(long, env = "TRAIN_WEIGHTS", default_value = "yolov10n.pt")]
    pub train_weights: PathBuf,

    #[arg(long, env = "TRAIN_PROJECT_DIR", default_value = "runs/train")]
    pub train_project_dir: PathBuf,

    #[arg(long, env = "TRAIN_EPOCHS", default_value_t = 100)]
    pub train_epochs: u32,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

impl StorageArgs {
    pub fn upload_policy(&self) -> UploadPolicy {
        UploadPolicy::new(self.max_upload_size, self.allowed_extensions.iter().cloned())
    }
}

impl From<Args> for DishRecognitionConfig {
    fn from(args: Args) -> Self {
        Self {
            storage: StorageConfig {
                data_dir: args.storage.data_dir,
                models_dir: args.storage.models_dir,
                uploads_dir: args.storage.uploads_dir,
                training_dir: args.storage.training_dir,
                catalog_path: args.storage.catalog_path,
                history_capacity: args.storage.history_capacity,
            },
            detector: DetectorConfig {
                model_path: args.detector.model_path,
                fallback_model_path: args.detector.fallback_model_path,
                labels_path: args.detector.labels_path,
                input_size: args.detector.input_size,
                conf_threshold: args.detector.conf_threshold,
                iou_threshold: args.detector.iou_threshold,
                max_detections: args.detector.max_detections,
                train_weights: args.detector.train_weights,
                train_project_dir: args.detector.train_project_dir,
                train_epochs: args.detector.train_epochs,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["dish-recognition-api"]).unwrap();

        assert_eq!(args.server.port, 8000);
        assert_eq!(args.storage.max_upload_size, 10_485_760);
        assert_eq!(
            args.storage.allowed_extensions,
            ["jpg", "jpeg", "png", "bmp", "webp"]
        );

        let config = DishRecognitionConfig::from(args);
        assert_eq!(config.detector.max_detections, 10);
        assert_eq!(config.storage.history_capacity, 100);
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::try_parse_from([
            "dish-recognition-api",
            "--server-port",
            "9000",
            "--allowed-extensions",
            "png,.JPG",
            "--conf-threshold",
            "0.25",
        ])
        .unwrap();

        assert_eq!(args.server.port, 9000);
        assert_eq!(args.detector.conf_threshold, 0.25);
        let policy = args.storage.upload_policy();
        assert!(policy.check_file_name(Some("plate.jpg")).is_ok());
        assert!(policy.check_file_name(Some("plate.webp")).is_err());
    }
}
