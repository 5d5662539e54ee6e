pub mod common;
pub mod detection;
pub mod dish;
pub mod health;
pub mod storage;
pub mod training;
