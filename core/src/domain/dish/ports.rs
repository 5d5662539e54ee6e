use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    dish::{
        entities::{Dish, DishCatalog},
        value_objects::{CreateDishInput, UpdateDishInput},
    },
};

#[cfg_attr(test, mockall::automock)]
pub trait DishService: Send + Sync {
    fn get_dishes(&self) -> impl Future<Output = Result<Vec<Dish>, CoreError>> + Send;

    fn get_dish(
        &self,
        dish_code: String,
    ) -> impl Future<Output = Result<Dish, CoreError>> + Send;

    fn create_dish(
        &self,
        input: CreateDishInput,
    ) -> impl Future<Output = Result<Dish, CoreError>> + Send;

    fn update_dish(
        &self,
        input: UpdateDishInput,
    ) -> impl Future<Output = Result<Dish, CoreError>> + Send;

    fn delete_dish(&self, dish_code: String)
    -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// Catalog persistence. Every mutation rewrites the whole backing document.
#[cfg_attr(test, mockall::automock)]
pub trait DishRepository: Send + Sync {
    fn get_all(&self) -> impl Future<Output = DishCatalog> + Send;

    fn get_by_code(
        &self,
        dish_code: String,
    ) -> impl Future<Output = Option<Dish>> + Send;

    /// Fails with [`CoreError::DishAlreadyExists`] and leaves the existing record untouched.
    fn add(&self, dish: Dish) -> impl Future<Output = Result<Dish, CoreError>> + Send;

    fn update(
        &self,
        input: UpdateDishInput,
    ) -> impl Future<Output = Result<Dish, CoreError>> + Send;

    fn delete(&self, dish_code: String) -> impl Future<Output = Result<Dish, CoreError>> + Send;
}
