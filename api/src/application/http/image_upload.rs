use axum::{extract::multipart::Field, http::StatusCode};
use bytes::Bytes;
use dish_recognition_core::domain::storage::policies::UploadPolicy;
use tracing::{error, warn};

use crate::application::http::server::api_entities::api_error::ApiError;

/// Multipart field carrying the uploaded image.
pub const IMAGE_FIELD: &str = "image";

/// Reads an image part, enforcing content type, extension and size.
pub async fn read_image_field(field: Field<'_>, policy: &UploadPolicy) -> Result<Bytes, ApiError> {
    policy.check_content_type(field.content_type())?;
    policy.check_file_name(field.file_name())?;

    let data = field.bytes().await.map_err(|e| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            warn!("Image upload exceeded the body limit");
            ApiError::PayloadTooLarge(format!(
                "File too large: max size is {} bytes",
                policy.max_size
            ))
        } else {
            error!("Failed to read image bytes: {}", e);
            ApiError::BadRequest(format!("Failed to read image: {}", e))
        }
    })?;

    policy.check_size(data.len())?;
    Ok(data)
}

pub async fn read_text_field(field: Field<'_>) -> Result<String, ApiError> {
    let name = field.name().unwrap_or_default().to_string();
    field
        .text()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read field {}: {}", name, e)))
}
