use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        dish::{
            entities::{Dish, DishCatalog, default_dishes},
            ports::DishRepository,
            value_objects::UpdateDishInput,
        },
    },
    infrastructure::dish::mappers::{DishDocument, catalog_from_document},
};

/// Catalog held in memory and mirrored to a single JSON document.
///
/// The document is read once in [`JsonDishRepository::load`]; later edits to the file made
/// by other processes are not observed. Mutations hold the write lock across the rewrite,
/// and a failed rewrite restores the previous in-memory state.
#[derive(Debug, Clone)]
pub struct JsonDishRepository {
    path: Arc<PathBuf>,
    catalog: Arc<RwLock<DishCatalog>>,
}

impl JsonDishRepository {
    /// Never fails: a missing or unreadable document falls back to the default dishes.
    pub async fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let catalog = read_catalog(&path).await;

        Self {
            path: Arc::new(path),
            catalog: Arc::new(RwLock::new(catalog)),
        }
    }

    async fn persist(&self, catalog: &DishCatalog) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                error!("Failed to create catalog directory: {}", e);
                CoreError::Storage(format!("Failed to create catalog directory: {}", e))
            })?;
        }

        let content = serde_json::to_string_pretty(catalog).map_err(|e| {
            error!("Failed to serialize dish catalog: {}", e);
            CoreError::Storage(format!("Failed to serialize dish catalog: {}", e))
        })?;

        tokio::fs::write(self.path.as_ref(), content)
            .await
            .map_err(|e| {
                error!(path = %self.path.display(), "Failed to write dish catalog: {}", e);
                CoreError::Storage(format!("Failed to write dish catalog: {}", e))
            })?;

        info!(
            path = %self.path.display(),
            count = catalog.len(),
            "Dish catalog saved"
        );
        Ok(())
    }
}

async fn read_catalog(path: &Path) -> DishCatalog {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "Dish catalog not readable, using default dishes"
            );
            return default_dishes();
        }
    };

    match serde_json::from_str::<DishDocument>(&content) {
        Ok(document) => {
            let catalog = catalog_from_document(document);
            info!(
                path = %path.display(),
                count = catalog.len(),
                "Dish catalog loaded"
            );
            catalog
        }
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "Failed to parse dish catalog, using default dishes"
            );
            default_dishes()
        }
    }
}

impl DishRepository for JsonDishRepository {
    async fn get_all(&self) -> DishCatalog {
        self.catalog.read().await.clone()
    }

    async fn get_by_code(&self, dish_code: String) -> Option<Dish> {
        self.catalog.read().await.get(&dish_code).cloned()
    }

    async fn add(&self, dish: Dish) -> Result<Dish, CoreError> {
        let mut catalog = self.catalog.write().await;

        if catalog.contains_key(&dish.dish_code) {
            warn!(dish_code = %dish.dish_code, "Dish code already exists");
            return Err(CoreError::DishAlreadyExists);
        }

        catalog.insert(dish.dish_code.clone(), dish.clone());

        if let Err(e) = self.persist(&catalog).await {
            catalog.remove(&dish.dish_code);
            return Err(e);
        }

        Ok(dish)
    }

    async fn update(&self, input: UpdateDishInput) -> Result<Dish, CoreError> {
        let mut catalog = self.catalog.write().await;

        let previous = catalog
            .get(&input.dish_code)
            .cloned()
            .ok_or(CoreError::DishNotFound)?;

        let mut updated = previous.clone();
        updated.update(input.dish_desc, input.category);
        catalog.insert(input.dish_code.clone(), updated.clone());

        if let Err(e) = self.persist(&catalog).await {
            catalog.insert(input.dish_code, previous);
            return Err(e);
        }

        Ok(updated)
    }

    async fn delete(&self, dish_code: String) -> Result<Dish, CoreError> {
        let mut catalog = self.catalog.write().await;

        let removed = catalog.remove(&dish_code).ok_or(CoreError::DishNotFound)?;

        if let Err(e) = self.persist(&catalog).await {
            catalog.insert(dish_code, removed);
            return Err(e);
        }

        Ok(removed)
    }
}
