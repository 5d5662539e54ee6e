pub mod json_dish_repository;

pub use json_dish_repository::JsonDishRepository;
