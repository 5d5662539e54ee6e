use std::{future::Future, path::PathBuf};

use crate::domain::{
    common::entities::app_errors::CoreError,
    detection::{
        entities::{Detection, DetectionHistory, DetectionRecord, DetectorMode, RecognitionOutcome},
        value_objects::RecognizeDishInput,
    },
    dish::entities::DishCatalog,
};

/// Object detector resolving model classes to catalog dishes.
///
/// Implementations never surface inference failures: a crashed prediction yields an
/// empty list and a failed training run yields `false`.
#[cfg_attr(test, mockall::automock)]
pub trait DishDetector: Send + Sync {
    fn mode(&self) -> DetectorMode;

    fn predict(
        &self,
        image_path: PathBuf,
        catalog: DishCatalog,
    ) -> impl Future<Output = Vec<Detection>> + Send;

    fn train(&self, data_path: PathBuf, epochs: u32) -> impl Future<Output = bool> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait DetectionHistoryRepository: Send + Sync {
    fn record(&self, record: DetectionRecord) -> impl Future<Output = ()> + Send;

    /// Most recent `limit` records, oldest first.
    fn recent(&self, limit: usize) -> impl Future<Output = DetectionHistory> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait RecognitionService: Send + Sync {
    fn recognize_dish(
        &self,
        input: RecognizeDishInput,
    ) -> impl Future<Output = Result<RecognitionOutcome, CoreError>> + Send;

    fn get_detection_history(
        &self,
    ) -> impl Future<Output = Result<DetectionHistory, CoreError>> + Send;

    fn detector_mode(&self) -> DetectorMode;
}
