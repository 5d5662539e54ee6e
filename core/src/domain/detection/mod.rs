pub mod entities;
pub mod mapper;
pub mod ports;
pub mod services;
pub mod simulation;
pub mod value_objects;

pub use entities::{Detection, DetectionHistory, DetectionRecord, DetectorMode};
pub use ports::{DetectionHistoryRepository, DishDetector, RecognitionService};
