use tracing::instrument;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    detection::ports::{DetectionHistoryRepository, DishDetector},
    dish::{
        entities::Dish,
        ports::{DishRepository, DishService},
        value_objects::{CreateDishInput, UpdateDishInput},
    },
    storage::ports::ImageStore,
};

pub const MIN_DISH_CODE_LENGTH: usize = 5;

/// Codes end up inside training image file names, so they are kept to a safe alphabet.
pub fn validate_dish_code(dish_code: &str) -> Result<(), CoreError> {
    if dish_code.chars().count() < MIN_DISH_CODE_LENGTH {
        return Err(CoreError::Invalid(format!(
            "dish_code must be at least {} characters",
            MIN_DISH_CODE_LENGTH
        )));
    }

    if !dish_code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(CoreError::Invalid(
            "dish_code may only contain ASCII letters, digits, '_' and '-'".to_string(),
        ));
    }

    Ok(())
}

impl<DR, DD, DH, IS> DishService for Service<DR, DD, DH, IS>
where
    DR: DishRepository,
    DD: DishDetector,
    DH: DetectionHistoryRepository,
    IS: ImageStore,
{
    async fn get_dishes(&self) -> Result<Vec<Dish>, CoreError> {
        let catalog = self.dish_repository.get_all().await;
        Ok(catalog.into_values().collect())
    }

    async fn get_dish(&self, dish_code: String) -> Result<Dish, CoreError> {
        self.dish_repository
            .get_by_code(dish_code)
            .await
            .ok_or(CoreError::DishNotFound)
    }

    #[instrument(skip(self), fields(dish_code = %input.dish_code))]
    async fn create_dish(&self, input: CreateDishInput) -> Result<Dish, CoreError> {
        validate_dish_code(&input.dish_code)?;

        let dish = Dish::new(input.dish_code, input.dish_desc, input.category);
        self.dish_repository.add(dish).await
    }

    #[instrument(skip(self), fields(dish_code = %input.dish_code))]
    async fn update_dish(&self, input: UpdateDishInput) -> Result<Dish, CoreError> {
        self.dish_repository.update(input).await
    }

    #[instrument(skip(self))]
    async fn delete_dish(&self, dish_code: String) -> Result<(), CoreError> {
        self.dish_repository.delete(dish_code).await?;
        Ok(())
    }
}
