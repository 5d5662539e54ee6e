use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Dish not found")]
    DishNotFound,

    #[error("Dish code already exists")]
    DishAlreadyExists,

    #[error("Invalid input: {0}")]
    Invalid(String),

    #[error("File too large: max size is {0} bytes")]
    FileTooLarge(usize),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Training error: {0}")]
    Training(String),

    #[error("Internal server error")]
    InternalServerError,
}
