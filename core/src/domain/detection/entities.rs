use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{common::round_to, dish::entities::Dish};

/// Number of history entries returned to clients.
pub const HISTORY_READ_LIMIT: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DetectorMode {
    Model,
    Simulation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Detection {
    pub dish_code: String,
    pub dish_desc: String,
    pub confidence: f32,
    /// `[x1, y1, x2, y2]` in pixels.
    #[schema(value_type = Vec<f32>)]
    pub bbox: [f32; 4],
    /// `bbox` divided by image width/height.
    #[schema(value_type = Vec<f32>)]
    pub bbox_normalized: [f32; 4],
}

impl Detection {
    pub fn new(dish: &Dish, confidence: f32, bbox: [f32; 4], width: u32, height: u32) -> Self {
        let (w, h) = (width.max(1) as f32, height.max(1) as f32);

        Self {
            dish_code: dish.dish_code.clone(),
            dish_desc: dish.dish_desc.clone(),
            confidence: round_to(confidence, 2),
            bbox,
            bbox_normalized: [
                round_to(bbox[0] / w, 3),
                round_to(bbox[1] / h, 3),
                round_to(bbox[2] / w, 3),
                round_to(bbox[3] / h, 3),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DetectionRecord {
    pub image_id: Uuid,
    pub filepath: String,
    pub results: Vec<Detection>,
    pub timestamp: DateTime<Utc>,
}

impl DetectionRecord {
    pub fn new(image_id: Uuid, filepath: String, results: Vec<Detection>) -> Self {
        Self {
            image_id,
            filepath,
            results,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DetectionHistory {
    /// Recognitions recorded since start-up, including evicted ones.
    pub total: usize,
    pub entries: Vec<DetectionRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecognitionOutcome {
    pub image_id: Uuid,
    pub image_path: String,
    pub results: Vec<Detection>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dish::entities::DishCategory;

    #[test]
    fn test_detection_rounds_and_normalizes() {
        let dish = Dish::new("dish_001".into(), "宫保鸡丁".into(), DishCategory::HotDish);
        let detection = Detection::new(&dish, 0.876, [10.0, 20.0, 110.0, 70.0], 200, 100);

        assert_eq!(detection.confidence, 0.88);
        assert_eq!(detection.bbox, [10.0, 20.0, 110.0, 70.0]);
        assert_eq!(detection.bbox_normalized, [0.05, 0.2, 0.55, 0.7]);
        assert_eq!(detection.dish_desc, "宫保鸡丁");
    }

    #[test]
    fn test_detector_mode_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(DetectorMode::Simulation).unwrap(),
            "simulation"
        );
    }
}
