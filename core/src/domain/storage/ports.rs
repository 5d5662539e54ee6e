use std::{future::Future, path::PathBuf};

use bytes::Bytes;
use uuid::Uuid;

use crate::domain::common::entities::app_errors::CoreError;

/// Local persistence for received images.
#[cfg_attr(test, mockall::automock)]
pub trait ImageStore: Send + Sync {
    /// Stores a recognition upload as `<timestamp>_<image_id>.jpg`.
    fn save_upload(
        &self,
        image_id: Uuid,
        payload: Bytes,
    ) -> impl Future<Output = Result<PathBuf, CoreError>> + Send;

    /// Stores a labeled image as `train_<timestamp>_<dish_code>.jpg`.
    fn save_training_image(
        &self,
        dish_code: String,
        payload: Bytes,
    ) -> impl Future<Output = Result<PathBuf, CoreError>> + Send;

    fn remove(&self, path: PathBuf) -> impl Future<Output = Result<(), CoreError>> + Send;
}
