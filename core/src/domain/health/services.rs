use crate::domain::{
    common::{SERVICE_NAME, SERVICE_VERSION, services::Service},
    detection::ports::{DetectionHistoryRepository, DishDetector},
    dish::ports::DishRepository,
    health::{entities::HealthStatus, ports::HealthCheckService},
    storage::ports::ImageStore,
};

impl<DR, DD, DH, IS> HealthCheckService for Service<DR, DD, DH, IS>
where
    DR: DishRepository,
    DD: DishDetector,
    DH: DetectionHistoryRepository,
    IS: ImageStore,
{
    fn health(&self) -> HealthStatus {
        HealthStatus {
            status: "healthy".to_string(),
            service: SERVICE_NAME.to_string(),
            version: SERVICE_VERSION.to_string(),
            detector_mode: self.detector.mode(),
        }
    }
}
