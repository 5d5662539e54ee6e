pub mod get_detection_history;
pub mod recognize_dish;
