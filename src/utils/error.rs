use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Dataset is missing required column: {column}")]
    MissingColumnError { column: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("rank is required")]
    MissingRankError,

    #[error("invalid rank: {value}")]
    InvalidRankError { value: String },

    #[error("Invalid request: {message}")]
    BadRequestError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Dataset,
    Configuration,
    Request,
}

impl AppError {
    /// 錯誤分類，用於日誌
    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::CsvError(_) | AppError::IoError(_) | AppError::MissingColumnError { .. } => {
                ErrorCategory::Dataset
            }
            AppError::ConfigError { .. }
            | AppError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            AppError::SerializationError(_)
            | AppError::MissingRankError
            | AppError::InvalidRankError { .. }
            | AppError::BadRequestError { .. } => ErrorCategory::Request,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
