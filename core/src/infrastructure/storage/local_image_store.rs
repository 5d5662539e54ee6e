use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use bytes::Bytes;
use tracing::{error, instrument};
use uuid::Uuid;

use crate::domain::{
    common::{entities::app_errors::CoreError, file_timestamp},
    storage::ports::ImageStore,
};

/// Writes uploaded images to two local directories.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    uploads_dir: Arc<PathBuf>,
    training_dir: Arc<PathBuf>,
}

impl LocalImageStore {
    /// Creates both directories if needed.
    pub async fn new(
        uploads_dir: impl Into<PathBuf>,
        training_dir: impl Into<PathBuf>,
    ) -> Result<Self, CoreError> {
        let uploads_dir = uploads_dir.into();
        let training_dir = training_dir.into();

        for dir in [&uploads_dir, &training_dir] {
            tokio::fs::create_dir_all(dir).await.map_err(|e| {
                error!(dir = %dir.display(), "Failed to create image directory: {}", e);
                CoreError::Storage(format!(
                    "Failed to create directory {}: {}",
                    dir.display(),
                    e
                ))
            })?;
        }

        Ok(Self {
            uploads_dir: Arc::new(uploads_dir),
            training_dir: Arc::new(training_dir),
        })
    }

    pub fn uploads_dir(&self) -> &Path {
        &self.uploads_dir
    }

    pub fn training_dir(&self) -> &Path {
        &self.training_dir
    }

    async fn write(path: PathBuf, payload: Bytes) -> Result<PathBuf, CoreError> {
        tokio::fs::write(&path, &payload).await.map_err(|e| {
            error!(path = %path.display(), "Failed to write image: {}", e);
            CoreError::Storage(format!("Failed to save image: {}", e))
        })?;
        Ok(path)
    }
}

impl ImageStore for LocalImageStore {
    #[instrument(skip(self, payload), fields(size_bytes = payload.len()))]
    async fn save_upload(&self, image_id: Uuid, payload: Bytes) -> Result<PathBuf, CoreError> {
        let file_name = format!("{}_{}.jpg", file_timestamp(), image_id);
        Self::write(self.uploads_dir.join(file_name), payload).await
    }

    #[instrument(skip(self, payload), fields(size_bytes = payload.len()))]
    async fn save_training_image(
        &self,
        dish_code: String,
        payload: Bytes,
    ) -> Result<PathBuf, CoreError> {
        let file_name = format!("train_{}_{}.jpg", file_timestamp(), dish_code);
        Self::write(self.training_dir.join(file_name), payload).await
    }

    async fn remove(&self, path: PathBuf) -> Result<(), CoreError> {
        tokio::fs::remove_file(&path).await.map_err(|e| {
            CoreError::Storage(format!("Failed to remove {}: {}", path.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[tokio::test]
    async fn test_new_creates_directories() {
        let dir = tempdir().unwrap();
        let uploads = dir.path().join("uploads");
        let training = dir.path().join("data").join("training");

        LocalImageStore::new(&uploads, &training).await.unwrap();

        assert!(uploads.is_dir());
        assert!(training.is_dir());
    }

    #[tokio::test]
    async fn test_save_upload_naming_and_content() {
        let dir = tempdir().unwrap();
        let store = LocalImageStore::new(dir.path().join("uploads"), dir.path().join("training"))
            .await
            .unwrap();
        let image_id = Uuid::new_v4();

        let path = store
            .save_upload(image_id, Bytes::from_static(b"jpeg bytes"))
            .await
            .unwrap();

        let file_name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(path.starts_with(store.uploads_dir()));
        assert!(file_name.ends_with(&format!("_{}.jpg", image_id)));
        assert_eq!(file_name.len(), 15 + 1 + 36 + 4);
        assert_eq!(std::fs::read(&path).unwrap(), b"jpeg bytes");
    }

    #[tokio::test]
    async fn test_save_training_image_then_remove() {
        let dir = tempdir().unwrap();
        let store = LocalImageStore::new(dir.path().join("uploads"), dir.path().join("training"))
            .await
            .unwrap();

        let path = store
            .save_training_image("dish_011".to_string(), Bytes::from_static(b"png"))
            .await
            .unwrap();

        let file_name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(file_name.starts_with("train_"));
        assert!(file_name.ends_with("_dish_011.jpg"));
        assert!(path.starts_with(store.training_dir()));

        store.remove(path.clone()).await.unwrap();
        assert!(!path.exists());
        assert!(store.remove(path).await.is_err());
    }
}
