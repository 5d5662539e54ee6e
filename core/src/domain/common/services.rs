use std::{path::PathBuf, sync::Arc};

use tokio::sync::Mutex;

use crate::domain::{
    detection::ports::{DetectionHistoryRepository, DishDetector},
    dish::ports::DishRepository,
    storage::ports::ImageStore,
};

/// Composition root shared by every domain service implementation.
#[derive(Clone)]
pub struct Service<DR, DD, DH, IS>
where
    DR: DishRepository,
    DD: DishDetector,
    DH: DetectionHistoryRepository,
    IS: ImageStore,
{
    pub(crate) dish_repository: DR,
    pub(crate) detector: DD,
    pub(crate) history_repository: DH,
    pub(crate) image_store: IS,
    pub(crate) training_data_path: PathBuf,
    pub(crate) default_epochs: u32,
    /// Serializes training ingestion so the duplicate check, image write and insert
    /// of one sample never interleave with another.
    pub(crate) training_lock: Arc<Mutex<()>>,
}

impl<DR, DD, DH, IS> Service<DR, DD, DH, IS>
where
    DR: DishRepository,
    DD: DishDetector,
    DH: DetectionHistoryRepository,
    IS: ImageStore,
{
    pub fn new(
        dish_repository: DR,
        detector: DD,
        history_repository: DH,
        image_store: IS,
        training_data_path: PathBuf,
        default_epochs: u32,
    ) -> Self {
        Self {
            dish_repository,
            detector,
            history_repository,
            image_store,
            training_data_path,
            default_epochs,
            training_lock: Arc::new(Mutex::new(())),
        }
    }
}
