pub mod history;
pub mod onnx_model;
pub mod postprocess;
pub mod trainer;
pub mod yolo_detector;

pub use history::InMemoryDetectionHistory;
pub use yolo_detector::YoloDishDetector;
