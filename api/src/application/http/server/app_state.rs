use std::sync::Arc;

use dish_recognition_core::{
    application::DishRecognitionService, domain::storage::policies::UploadPolicy,
};

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: DishRecognitionService,
    pub upload_policy: Arc<UploadPolicy>,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: DishRecognitionService) -> Self {
        let upload_policy = args.storage.upload_policy();
        Self {
            args,
            service,
            upload_policy: Arc::new(upload_policy),
        }
    }
}
