use tracing::{info, instrument, warn};

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    detection::ports::{DetectionHistoryRepository, DishDetector},
    dish::{entities::Dish, ports::DishRepository, services::validate_dish_code},
    storage::ports::ImageStore,
    training::{
        entities::{TrainingRun, TrainingSample},
        ports::TrainingService,
        value_objects::{AddTrainingDataInput, TrainModelInput},
    },
};

impl<DR, DD, DH, IS> TrainingService for Service<DR, DD, DH, IS>
where
    DR: DishRepository,
    DD: DishDetector,
    DH: DetectionHistoryRepository,
    IS: ImageStore,
{
    #[instrument(skip(self, input), fields(dish_code = %input.dish_code))]
    async fn add_training_data(
        &self,
        input: AddTrainingDataInput,
    ) -> Result<TrainingSample, CoreError> {
        validate_dish_code(&input.dish_code)?;

        let _guard = self.training_lock.lock().await;

        if self
            .dish_repository
            .get_by_code(input.dish_code.clone())
            .await
            .is_some()
        {
            return Err(CoreError::DishAlreadyExists);
        }

        let image_path = self
            .image_store
            .save_training_image(input.dish_code.clone(), input.image_data)
            .await?;

        let dish = Dish::new(input.dish_code, input.dish_desc, input.category);
        let dish = match self.dish_repository.add(dish).await {
            Ok(dish) => dish,
            Err(e) => {
                // A rejected insert must not leave an unlabeled image behind.
                if let Err(remove_err) = self.image_store.remove(image_path.clone()).await {
                    warn!(
                        path = %image_path.display(),
                        error = %remove_err,
                        "Failed to remove orphaned training image"
                    );
                }
                return Err(e);
            }
        };

        info!(
            dish_code = %dish.dish_code,
            image_path = %image_path.display(),
            "Training sample added"
        );

        Ok(TrainingSample {
            dish,
            image_path: image_path.to_string_lossy().into_owned(),
        })
    }

    #[instrument(skip(self))]
    async fn train_model(&self, input: TrainModelInput) -> Result<TrainingRun, CoreError> {
        let data_path = input
            .data_path
            .unwrap_or_else(|| self.training_data_path.clone());
        let epochs = input.epochs.unwrap_or(self.default_epochs);

        if epochs == 0 {
            return Err(CoreError::Invalid("epochs must be at least 1".to_string()));
        }

        let success = self.detector.train(data_path.clone(), epochs).await;

        Ok(TrainingRun {
            success,
            data_path: data_path.to_string_lossy().into_owned(),
            epochs,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use bytes::Bytes;

    use super::*;
    use crate::domain::{
        detection::ports::{MockDetectionHistoryRepository, MockDishDetector},
        dish::{entities::DishCategory, ports::MockDishRepository},
        storage::ports::MockImageStore,
    };

    type MockService =
        Service<MockDishRepository, MockDishDetector, MockDetectionHistoryRepository, MockImageStore>;

    fn service_with(dish_repository: MockDishRepository, image_store: MockImageStore) -> MockService {
        Service::new(
            dish_repository,
            MockDishDetector::new(),
            MockDetectionHistoryRepository::new(),
            image_store,
            PathBuf::from("data/training"),
            100,
        )
    }

    fn sample(code: &str) -> AddTrainingDataInput {
        AddTrainingDataInput {
            dish_code: code.to_string(),
            dish_desc: "酸辣土豆丝".to_string(),
            category: DishCategory::Vegetable,
            image_data: Bytes::from_static(b"jpeg bytes"),
        }
    }

    #[tokio::test]
    async fn test_failed_insert_removes_saved_image() {
        let saved = PathBuf::from("data/training/train_20250101_093000_dish_050.jpg");

        let mut dish_repository = MockDishRepository::new();
        dish_repository
            .expect_get_by_code()
            .times(1)
            .returning(|_| Box::pin(async { None }));
        dish_repository.expect_add().times(1).returning(|_| {
            Box::pin(async { Err(CoreError::Storage("disk full".to_string())) })
        });

        let mut image_store = MockImageStore::new();
        let returned = saved.clone();
        image_store
            .expect_save_training_image()
            .times(1)
            .returning(move |_, _| {
                let path = returned.clone();
                Box::pin(async move { Ok(path) })
            });
        let expected = saved.clone();
        image_store
            .expect_remove()
            .withf(move |path| *path == expected)
            .times(1)
            .returning(|_| Box::pin(async { Ok(()) }));

        let service = service_with(dish_repository, image_store);
        let result = service.add_training_data(sample("dish_050")).await;

        assert_eq!(result, Err(CoreError::Storage("disk full".to_string())));
    }

    #[tokio::test]
    async fn test_existing_code_never_reaches_the_image_store() {
        let mut dish_repository = MockDishRepository::new();
        dish_repository.expect_get_by_code().times(1).returning(|code| {
            let dish = Dish::new(code, "宫保鸡丁".to_string(), DishCategory::HotDish);
            Box::pin(async move { Some(dish) })
        });
        dish_repository.expect_add().times(0);

        let mut image_store = MockImageStore::new();
        image_store.expect_save_training_image().times(0);
        image_store.expect_remove().times(0);

        let service = service_with(dish_repository, image_store);
        let result = service.add_training_data(sample("dish_001")).await;

        assert_eq!(result, Err(CoreError::DishAlreadyExists));
    }

    #[tokio::test]
    async fn test_invalid_code_touches_nothing() {
        let mut dish_repository = MockDishRepository::new();
        dish_repository.expect_get_by_code().times(0);

        let mut image_store = MockImageStore::new();
        image_store.expect_save_training_image().times(0);

        let service = service_with(dish_repository, image_store);
        let result = service.add_training_data(sample("abc")).await;

        assert!(matches!(result, Err(CoreError::Invalid(_))));
    }
}
