use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::{error, info};

use crate::domain::common::entities::app_errors::CoreError;

pub const TRAIN_RUN_NAME: &str = "dish_recognition";

/// Runs `yolo detect train` from the ultralytics CLI.
#[derive(Debug, Clone)]
pub struct UltralyticsTrainer {
    program: String,
    weights: PathBuf,
    project_dir: PathBuf,
    input_size: u32,
}

impl UltralyticsTrainer {
    pub fn new(weights: PathBuf, project_dir: PathBuf, input_size: u32) -> Self {
        Self {
            program: "yolo".to_string(),
            weights,
            project_dir,
            input_size,
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn args(&self, data_path: &Path, epochs: u32) -> Vec<String> {
        vec![
            "detect".to_string(),
            "train".to_string(),
            format!("data={}", data_path.display()),
            format!("model={}", self.weights.display()),
            format!("epochs={}", epochs),
            format!("imgsz={}", self.input_size),
            "batch=-1".to_string(),
            "save_period=10".to_string(),
            format!("project={}", self.project_dir.display()),
            format!("name={}", TRAIN_RUN_NAME),
            "exist_ok=True".to_string(),
        ]
    }

    pub async fn train(&self, data_path: &Path, epochs: u32) -> Result<PathBuf, CoreError> {
        info!(
            program = %self.program,
            data = %data_path.display(),
            epochs,
            "Starting model training"
        );

        let output = Command::new(&self.program)
            .args(self.args(data_path, epochs))
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                error!("Failed to launch {}: {}", self.program, e);
                CoreError::Training(format!("Failed to launch {}: {}", self.program, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let tail: String = stderr
                .lines()
                .rev()
                .take(5)
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect::<Vec<_>>()
                .join("\n");
            error!(status = %output.status, "Training failed: {}", tail);
            return Err(CoreError::Training(format!(
                "Training exited with {}",
                output.status
            )));
        }

        let run_dir = self.project_dir.join(TRAIN_RUN_NAME);
        info!(run_dir = %run_dir.display(), "Model training finished");
        Ok(run_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trainer() -> UltralyticsTrainer {
        UltralyticsTrainer::new(
            PathBuf::from("yolov10n.pt"),
            PathBuf::from("runs/train"),
            640,
        )
    }

    #[test]
    fn test_args_carry_training_options() {
        let args = trainer().args(Path::new("data/training/data.yaml"), 5);

        assert_eq!(&args[..2], ["detect", "train"]);
        assert!(args.contains(&"data=data/training/data.yaml".to_string()));
        assert!(args.contains(&"epochs=5".to_string()));
        assert!(args.contains(&"imgsz=640".to_string()));
        assert!(args.contains(&"name=dish_recognition".to_string()));
    }

    #[tokio::test]
    async fn test_missing_program_is_a_training_error() {
        let trainer = trainer().with_program("definitely-not-a-yolo-binary");

        let result = trainer.train(Path::new("data.yaml"), 1).await;

        assert!(matches!(result, Err(CoreError::Training(_))));
    }
}
