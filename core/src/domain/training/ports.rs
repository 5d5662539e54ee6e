use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    training::{
        entities::{TrainingRun, TrainingSample},
        value_objects::{AddTrainingDataInput, TrainModelInput},
    },
};

#[cfg_attr(test, mockall::automock)]
pub trait TrainingService: Send + Sync {
    fn add_training_data(
        &self,
        input: AddTrainingDataInput,
    ) -> impl Future<Output = Result<TrainingSample, CoreError>> + Send;

    fn train_model(
        &self,
        input: TrainModelInput,
    ) -> impl Future<Output = Result<TrainingRun, CoreError>> + Send;
}
