pub mod detection;
pub mod dish;
pub mod storage;
