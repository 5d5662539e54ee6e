pub mod add_training_data;
pub mod train_model;
