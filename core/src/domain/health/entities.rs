use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::detection::entities::DetectorMode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub version: String,
    pub detector_mode: DetectorMode,
}
