pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{TrainingRun, TrainingSample};
pub use ports::TrainingService;
