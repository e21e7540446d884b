use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Settings error: {0}")]
    SettingsError(#[from] serde_json::Error),
    #[error("Order {0} not found")]
    OrderNotFound(u32),
    #[error("Unknown payment module: {0}")]
    UnknownProcessor(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Storage error: {0}")]
    StorageError(String),
}

pub type Result<T> = std::result::Result<T, PaymentError>;
