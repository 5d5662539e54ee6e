use tracing::{error, info};

use crate::{
    domain::common::{
        DishRecognitionConfig, entities::app_errors::CoreError, services::Service,
    },
    infrastructure::{
        detection::{InMemoryDetectionHistory, YoloDishDetector},
        dish::JsonDishRepository,
        storage::LocalImageStore,
    },
};

pub type DishRecognitionService =
    Service<JsonDishRepository, YoloDishDetector, InMemoryDetectionHistory, LocalImageStore>;

pub async fn create_service(
    config: DishRecognitionConfig,
) -> Result<DishRecognitionService, CoreError> {
    let storage = &config.storage;

    for dir in [&storage.data_dir, &storage.models_dir] {
        tokio::fs::create_dir_all(dir).await.map_err(|e| {
            CoreError::Storage(format!("Failed to create {}: {}", dir.display(), e))
        })?;
    }

    let image_store = LocalImageStore::new(&storage.uploads_dir, &storage.training_dir).await?;
    let dish_repository = JsonDishRepository::load(&storage.catalog_path).await;

    let detector_config = config.detector.clone();
    let detector = tokio::task::spawn_blocking(move || YoloDishDetector::load(&detector_config))
        .await
        .map_err(|e| {
            error!(error = %e, "Detector initialization task aborted");
            CoreError::InternalServerError
        })?;

    let history_repository = InMemoryDetectionHistory::new(storage.history_capacity);

    info!(
        catalog = %storage.catalog_path.display(),
        uploads = %storage.uploads_dir.display(),
        "Dish recognition service initialized"
    );

    Ok(Service::new(
        dish_repository,
        detector,
        history_repository,
        image_store,
        storage.training_dir.clone(),
        config.detector.train_epochs,
    ))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use bytes::Bytes;
    use image::{ImageBuffer, ImageFormat, Rgb};
    use tempfile::tempdir;

    use super::*;
    use crate::domain::{
        common::{DetectorConfig, StorageConfig},
        detection::{entities::DetectorMode, ports::RecognitionService, value_objects::RecognizeDishInput},
        dish::{
            entities::DishCategory,
            ports::DishService,
            value_objects::{CreateDishInput, UpdateDishInput},
        },
        health::ports::HealthCheckService,
        training::{
            ports::TrainingService,
            value_objects::{AddTrainingDataInput, TrainModelInput},
        },
    };

    fn config_in(root: &Path) -> DishRecognitionConfig {
        DishRecognitionConfig {
            storage: StorageConfig {
                data_dir: root.join("data"),
                models_dir: root.join("models"),
                uploads_dir: root.join("uploads"),
                training_dir: root.join("data/training"),
                catalog_path: root.join("data/dish_database.json"),
                history_capacity: 100,
            },
            detector: DetectorConfig {
                model_path: root.join("models/none.onnx"),
                fallback_model_path: root.join("models/none_either.onnx"),
                ..DetectorConfig::default()
            },
        }
    }

    fn png_bytes() -> Bytes {
        let image: ImageBuffer<Rgb<u8>, Vec<u8>> =
            ImageBuffer::from_pixel(64, 48, Rgb([10, 200, 30]));
        let mut buffer = std::io::Cursor::new(Vec::new());
        image.write_to(&mut buffer, ImageFormat::Png).unwrap();
        Bytes::from(buffer.into_inner())
    }

    fn sample(code: &str) -> AddTrainingDataInput {
        AddTrainingDataInput {
            dish_code: code.to_string(),
            dish_desc: "酸辣土豆丝".to_string(),
            category: DishCategory::Vegetable,
            image_data: png_bytes(),
        }
    }

    #[tokio::test]
    async fn test_create_service_bootstraps_directories() {
        let dir = tempdir().unwrap();
        let service = create_service(config_in(dir.path())).await.unwrap();

        for sub in ["data", "models", "uploads", "data/training"] {
            assert!(dir.path().join(sub).is_dir(), "{} missing", sub);
        }
        assert_eq!(service.detector_mode(), DetectorMode::Simulation);
        assert_eq!(service.health().status, "healthy");
        assert_eq!(service.get_dishes().await.unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_recognize_records_history() {
        let dir = tempdir().unwrap();
        let service = create_service(config_in(dir.path())).await.unwrap();

        let outcome = service
            .recognize_dish(RecognizeDishInput {
                image_data: png_bytes(),
            })
            .await
            .unwrap();

        assert!((1..=3).contains(&outcome.results.len()));
        assert!(Path::new(&outcome.image_path).is_file());

        let history = service.get_detection_history().await.unwrap();
        assert_eq!(history.total, 1);
        assert_eq!(history.entries[0].image_id, outcome.image_id);
        assert_eq!(history.entries[0].results, outcome.results);
    }

    #[tokio::test]
    async fn test_add_training_data_persists_dish_and_image() {
        let dir = tempdir().unwrap();
        let service = create_service(config_in(dir.path())).await.unwrap();

        let added = service.add_training_data(sample("dish_011")).await.unwrap();

        assert!(Path::new(&added.image_path).is_file());
        assert_eq!(service.get_dish("dish_011".into()).await.unwrap(), added.dish);
        assert!(dir.path().join("data/dish_database.json").is_file());
    }

    #[tokio::test]
    async fn test_rejected_training_data_leaves_nothing_behind() {
        let dir = tempdir().unwrap();
        let service = create_service(config_in(dir.path())).await.unwrap();
        let training_dir = dir.path().join("data/training");

        let short = service.add_training_data(sample("short")).await;
        let too_short = service.add_training_data(sample("abcd")).await;
        let duplicate = service.add_training_data(sample("dish_001")).await;

        assert!(short.is_ok(), "five characters is the minimum");
        assert!(matches!(too_short, Err(CoreError::Invalid(_))));
        assert_eq!(duplicate, Err(CoreError::DishAlreadyExists));
        assert_eq!(std::fs::read_dir(&training_dir).unwrap().count(), 1);
        assert_eq!(service.get_dishes().await.unwrap().len(), 11);
    }

    #[tokio::test]
    async fn test_dish_crud_round_trip() {
        let dir = tempdir().unwrap();
        let service = create_service(config_in(dir.path())).await.unwrap();

        service
            .create_dish(CreateDishInput {
                dish_code: "dish_020".into(),
                dish_desc: "水煮鱼".into(),
                category: DishCategory::Specialty,
            })
            .await
            .unwrap();
        let updated = service
            .update_dish(UpdateDishInput {
                dish_code: "dish_020".into(),
                dish_desc: Some("酸菜鱼".into()),
                category: None,
            })
            .await
            .unwrap();
        assert_eq!(updated.dish_desc, "酸菜鱼");
        assert_eq!(updated.category, DishCategory::Specialty);

        service.delete_dish("dish_020".into()).await.unwrap();
        assert_eq!(
            service.get_dish("dish_020".into()).await,
            Err(CoreError::DishNotFound)
        );
        assert_eq!(
            service.delete_dish("dish_020".into()).await,
            Err(CoreError::DishNotFound)
        );
    }

    #[tokio::test]
    async fn test_train_model_in_simulation_reports_failure() {
        let dir = tempdir().unwrap();
        let service = create_service(config_in(dir.path())).await.unwrap();

        let run = service.train_model(TrainModelInput::default()).await.unwrap();
        assert!(!run.success);
        assert_eq!(run.epochs, 100);

        let invalid = service
            .train_model(TrainModelInput {
                data_path: None,
                epochs: Some(0),
            })
            .await;
        assert!(matches!(invalid, Err(CoreError::Invalid(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_samples_for_one_code_keep_the_winner_image() {
        let dir = tempdir().unwrap();
        let service = create_service(config_in(dir.path())).await.unwrap();

        for round in 0..20 {
            let code = format!("dish_{:03}", 100 + round);
            let (first, second) = tokio::join!(
                service.add_training_data(sample(&code)),
                service.add_training_data(sample(&code)),
            );

            let (winner, loser) = match (first, second) {
                (Ok(winner), Err(loser)) | (Err(loser), Ok(winner)) => (winner, loser),
                other => panic!("expected exactly one accepted sample, got {:?}", other),
            };

            assert_eq!(loser, CoreError::DishAlreadyExists);
            assert!(Path::new(&winner.image_path).is_file());
            assert_eq!(winner.dish.dish_code, code);
        }

        let stored = std::fs::read_dir(dir.path().join("data/training"))
            .unwrap()
            .count();
        assert_eq!(stored, 20);
    }
}
