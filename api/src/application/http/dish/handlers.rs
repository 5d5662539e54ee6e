pub mod create_dish;
pub mod delete_dish;
pub mod get_dish;
pub mod get_dishes;
pub mod update_dish;
