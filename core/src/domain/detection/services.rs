use tracing::{info, instrument};

use crate::domain::{
    common::{entities::app_errors::CoreError, generate_uuid_v4, services::Service},
    detection::{
        entities::{
            DetectionHistory, DetectionRecord, DetectorMode, HISTORY_READ_LIMIT,
            RecognitionOutcome,
        },
        ports::{DetectionHistoryRepository, DishDetector, RecognitionService},
        value_objects::RecognizeDishInput,
    },
    dish::ports::DishRepository,
    storage::ports::ImageStore,
};

impl<DR, DD, DH, IS> RecognitionService for Service<DR, DD, DH, IS>
where
    DR: DishRepository,
    DD: DishDetector,
    DH: DetectionHistoryRepository,
    IS: ImageStore,
{
    #[instrument(skip(self, input), fields(size_bytes = input.image_data.len()))]
    async fn recognize_dish(
        &self,
        input: RecognizeDishInput,
    ) -> Result<RecognitionOutcome, CoreError> {
        let image_id = generate_uuid_v4();

        let image_path = self
            .image_store
            .save_upload(image_id, input.image_data)
            .await?;

        let catalog = self.dish_repository.get_all().await;
        let results = self.detector.predict(image_path.clone(), catalog).await;

        info!(
            image_id = %image_id,
            detections = results.len(),
            mode = ?self.detector.mode(),
            "Dish recognition completed"
        );

        let filepath = image_path.to_string_lossy().into_owned();
        self.history_repository
            .record(DetectionRecord::new(
                image_id,
                filepath.clone(),
                results.clone(),
            ))
            .await;

        Ok(RecognitionOutcome {
            image_id,
            image_path: filepath,
            results,
        })
    }

    async fn get_detection_history(&self) -> Result<DetectionHistory, CoreError> {
        Ok(self.history_repository.recent(HISTORY_READ_LIMIT).await)
    }

    fn detector_mode(&self) -> DetectorMode {
        self.detector.mode()
    }
}
