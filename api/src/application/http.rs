pub mod dish;
pub mod health;
pub mod image_upload;
pub mod recognition;
pub mod server;
pub mod training;
