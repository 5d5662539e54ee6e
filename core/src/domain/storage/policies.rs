use std::{collections::HashSet, path::Path};

use crate::domain::common::entities::app_errors::CoreError;

pub const DEFAULT_MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024;
pub const DEFAULT_ALLOWED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "bmp", "webp"];

/// Acceptance rules for uploaded images.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub max_size: usize,
    pub allowed_extensions: HashSet<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_MAX_UPLOAD_SIZE,
            DEFAULT_ALLOWED_EXTENSIONS.iter().map(|e| e.to_string()),
        )
    }
}

impl UploadPolicy {
    pub fn new(max_size: usize, allowed_extensions: impl IntoIterator<Item = String>) -> Self {
        Self {
            max_size,
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
        }
    }

    pub fn check_content_type(&self, content_type: Option<&str>) -> Result<(), CoreError> {
        match content_type {
            Some(content_type) if content_type.starts_with("image/") => Ok(()),
            _ => Err(CoreError::Invalid(
                "Only image uploads are supported".to_string(),
            )),
        }
    }

    /// File names without an extension are accepted; the stored copy is always renamed.
    pub fn check_file_name(&self, file_name: Option<&str>) -> Result<(), CoreError> {
        let Some(extension) = file_name
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
        else {
            return Ok(());
        };

        if self
            .allowed_extensions
            .contains(&extension.to_ascii_lowercase())
        {
            Ok(())
        } else {
            Err(CoreError::Invalid(format!(
                "Unsupported file extension: .{}",
                extension
            )))
        }
    }

    pub fn check_size(&self, size: usize) -> Result<(), CoreError> {
        if size == 0 {
            return Err(CoreError::Invalid("Image cannot be empty".to_string()));
        }
        if size > self.max_size {
            return Err(CoreError::FileTooLarge(self.max_size));
        }
        Ok(())
    }
}
