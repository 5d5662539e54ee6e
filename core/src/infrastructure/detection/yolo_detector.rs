use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tracing::{error, info, warn};

use crate::{
    domain::{
        common::{DetectorConfig, entities::app_errors::CoreError},
        detection::{
            entities::{Detection, DetectorMode},
            mapper::{class_name_for, map_class_to_dish},
            ports::DishDetector,
            simulation::simulate_detections,
        },
        dish::entities::DishCatalog,
    },
    infrastructure::detection::{
        onnx_model::OnnxYoloModel, postprocess::DecodeParams, trainer::UltralyticsTrainer,
    },
};

#[derive(Debug)]
enum DetectorBackend {
    Model {
        model: OnnxYoloModel,
        model_path: PathBuf,
    },
    Simulation,
}

#[derive(Debug, Clone)]
pub struct YoloDishDetector {
    backend: Arc<DetectorBackend>,
    params: DecodeParams,
    class_names: Arc<Vec<String>>,
    trainer: UltralyticsTrainer,
}

impl YoloDishDetector {
    /// Tries the configured model, then the fallback, and otherwise runs in simulation.
    pub fn load(config: &DetectorConfig) -> Self {
        let mut backend = DetectorBackend::Simulation;

        for path in [&config.model_path, &config.fallback_model_path] {
            match OnnxYoloModel::load(path, config.input_size) {
                Ok(model) => {
                    info!(path = %path.display(), "Detection model loaded");
                    backend = DetectorBackend::Model {
                        model,
                        model_path: path.clone(),
                    };
                    break;
                }
                Err(e) => warn!(path = %path.display(), error = %e, "Detection model unavailable"),
            }
        }

        if matches!(backend, DetectorBackend::Simulation) {
            warn!("No detection model could be loaded, running in simulation mode");
        }

        Self::with_backend(backend, config)
    }

    pub fn simulation(config: &DetectorConfig) -> Self {
        Self::with_backend(DetectorBackend::Simulation, config)
    }

    fn with_backend(backend: DetectorBackend, config: &DetectorConfig) -> Self {
        let class_names = resolve_class_names(&backend, config.labels_path.as_deref());

        Self {
            backend: Arc::new(backend),
            params: DecodeParams {
                conf_threshold: config.conf_threshold,
                iou_threshold: config.iou_threshold,
                max_detections: config.max_detections,
            },
            class_names: Arc::new(class_names),
            trainer: UltralyticsTrainer::new(
                config.train_weights.clone(),
                config.train_project_dir.clone(),
                config.input_size,
            ),
        }
    }
}

/// A labels file overrides the names embedded in the model; without either, classes
/// resolve to `class_<id>`.
fn resolve_class_names(backend: &DetectorBackend, labels_path: Option<&Path>) -> Vec<String> {
    let from_file = labels_path.map(read_labels).unwrap_or_default();
    if !from_file.is_empty() {
        return from_file;
    }

    match backend {
        DetectorBackend::Model { model, .. } => model.class_names().to_vec(),
        DetectorBackend::Simulation => Vec::new(),
    }
}

/// One label per line; blank lines are skipped.
fn read_labels(path: &Path) -> Vec<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let labels: Vec<String> = content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect();
            info!(path = %path.display(), count = labels.len(), "Class labels loaded");
            labels
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Class labels not readable");
            Vec::new()
        }
    }
}

fn run_prediction(
    backend: &DetectorBackend,
    params: &DecodeParams,
    class_names: &[String],
    image_path: &Path,
    catalog: &DishCatalog,
) -> Result<Vec<Detection>, CoreError> {
    match backend {
        DetectorBackend::Simulation => {
            let (width, height) = image::image_dimensions(image_path)
                .map_err(|e| CoreError::Inference(format!("Failed to read image: {}", e)))?;
            Ok(simulate_detections(
                &mut rand::thread_rng(),
                catalog,
                width,
                height,
            ))
        }
        DetectorBackend::Model { model, .. } => {
            let output = model.infer(image_path, params)?;
            Ok(output
                .detections
                .into_iter()
                .filter_map(|raw| {
                    let label = class_name_for(raw.class_id, class_names);
                    map_class_to_dish(&label, catalog).map(|dish| {
                        Detection::new(dish, raw.score, raw.bbox, output.width, output.height)
                    })
                })
                .collect())
        }
    }
}

impl DishDetector for YoloDishDetector {
    fn mode(&self) -> DetectorMode {
        match self.backend.as_ref() {
            DetectorBackend::Model { .. } => DetectorMode::Model,
            DetectorBackend::Simulation => DetectorMode::Simulation,
        }
    }

    async fn predict(&self, image_path: PathBuf, catalog: DishCatalog) -> Vec<Detection> {
        let backend = self.backend.clone();
        let params = self.params;
        let class_names = self.class_names.clone();
        let path = image_path.clone();

        let task = tokio::task::spawn_blocking(move || {
            run_prediction(&backend, &params, &class_names, &path, &catalog)
        });

        match task.await {
            Ok(Ok(detections)) => detections,
            Ok(Err(e)) => {
                error!(path = %image_path.display(), error = %e, "Prediction failed");
                Vec::new()
            }
            Err(e) => {
                error!(path = %image_path.display(), error = %e, "Prediction task aborted");
                Vec::new()
            }
        }
    }

    async fn train(&self, data_path: PathBuf, epochs: u32) -> bool {
        let DetectorBackend::Model { model_path, .. } = self.backend.as_ref() else {
            warn!("No detection model loaded, training skipped");
            return false;
        };

        info!(model = %model_path.display(), "Model training requested");
        match self.trainer.train(&data_path, epochs).await {
            Ok(_) => true,
            Err(e) => {
                error!(error = %e, "Model training failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use image::{ImageBuffer, Rgb};
    use tempfile::tempdir;

    use super::*;
    use crate::domain::dish::entities::default_dishes;

    fn config_in(dir: &Path) -> DetectorConfig {
        DetectorConfig {
            model_path: dir.join("missing.onnx"),
            fallback_model_path: dir.join("also_missing.onnx"),
            ..DetectorConfig::default()
        }
    }

    fn write_png(path: &Path, width: u32, height: u32) {
        let image: ImageBuffer<Rgb<u8>, Vec<u8>> =
            ImageBuffer::from_pixel(width, height, Rgb([200, 120, 40]));
        image.save(path).unwrap();
    }

    #[test]
    fn test_missing_models_fall_back_to_simulation() {
        let dir = tempdir().unwrap();
        let detector = YoloDishDetector::load(&config_in(dir.path()));
        assert_eq!(detector.mode(), DetectorMode::Simulation);
    }

    #[test]
    fn test_labels_file_is_read() {
        let dir = tempdir().unwrap();
        let labels = dir.path().join("labels.txt");
        std::fs::write(&labels, "rice\n\n  noodles \n").unwrap();
        let config = DetectorConfig {
            labels_path: Some(labels),
            ..config_in(dir.path())
        };

        let detector = YoloDishDetector::simulation(&config);

        assert_eq!(detector.class_names.as_slice(), ["rice", "noodles"]);
    }

    #[test]
    fn test_empty_labels_file_falls_back_to_model_names() {
        let dir = tempdir().unwrap();
        let labels = dir.path().join("labels.txt");
        std::fs::write(&labels, "\n \n").unwrap();

        let names = resolve_class_names(&DetectorBackend::Simulation, Some(&labels));
        assert!(names.is_empty());
        assert!(resolve_class_names(&DetectorBackend::Simulation, None).is_empty());
    }

    #[tokio::test]
    async fn test_simulated_prediction_stays_in_bounds() {
        let dir = tempdir().unwrap();
        let image_path = dir.path().join("plate.png");
        write_png(&image_path, 320, 240);
        let detector = YoloDishDetector::simulation(&config_in(dir.path()));
        let catalog = default_dishes();

        let detections = detector.predict(image_path, catalog.clone()).await;

        assert!((1..=3).contains(&detections.len()));
        for det in &detections {
            assert!(catalog.contains_key(&det.dish_code));
            assert!(det.bbox[0] < det.bbox[2] && det.bbox[1] < det.bbox[3]);
            assert!(det.bbox[2] <= 320.0 && det.bbox[3] <= 240.0);
            assert!(det.bbox_normalized.iter().all(|v| (0.0..=1.0).contains(v)));
        }
    }

    #[tokio::test]
    async fn test_unreadable_image_yields_no_detections() {
        let dir = tempdir().unwrap();
        let image_path = dir.path().join("plate.jpg");
        std::fs::write(&image_path, b"definitely not an image").unwrap();
        let detector = YoloDishDetector::simulation(&config_in(dir.path()));

        let detections = detector.predict(image_path, default_dishes()).await;

        assert!(detections.is_empty());
    }

    #[tokio::test]
    async fn test_training_without_model_reports_failure() {
        let dir = tempdir().unwrap();
        let detector = YoloDishDetector::simulation(&config_in(dir.path()));

        assert!(!detector.train(dir.path().join("data.yaml"), 1).await);
    }
}
