use crate::domain::health::entities::HealthStatus;

pub trait HealthCheckService: Send + Sync {
    /// Liveness only; the detector running in simulation still counts as healthy.
    fn health(&self) -> HealthStatus;
}
