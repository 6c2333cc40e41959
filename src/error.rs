//! Error types for car price training and inference

use thiserror::Error;

/// Result type alias for car price operations
pub type Result<T> = std::result::Result<T, CarPriceError>;

/// Main error type for the crate
#[derive(Error, Debug)]
pub enum CarPriceError {
    #[error("Data error: {0}")]
    DataError(String),

    #[error("Cannot parse {field} value {value:?}")]
    ParseError { field: String, value: String },

    #[error("Data integrity error: target column '{0}' is not present")]
    MissingTarget(String),

    #[error("Feature not found: {0}")]
    FeatureNotFound(String),

    #[error("Model not fitted")]
    ModelNotFitted,

    #[error("Invalid shape: expected {expected}, got {actual}")]
    ShapeError { expected: String, actual: String },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Artifact not found: {0}")]
    ArtifactNotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CarPriceError {
    pub(crate) fn parse(field: &str, value: impl Into<String>) -> Self {
        CarPriceError::ParseError {
            field: field.to_string(),
            value: value.into(),
        }
    }
}

impl From<polars::error::PolarsError> for CarPriceError {
    fn from(err: polars::error::PolarsError) -> Self {
        CarPriceError::DataError(err.to_string())
    }
}

impl From<serde_json::Error> for CarPriceError {
    fn from(err: serde_json::Error) -> Self {
        CarPriceError::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for CarPriceError {
    fn from(err: serde_yaml::Error) -> Self {
        CarPriceError::ConfigError(err.to_string())
    }
}

impl From<ndarray::ShapeError> for CarPriceError {
    fn from(err: ndarray::ShapeError) -> Self {
        CarPriceError::ShapeError {
            expected: "valid shape".to_string(),
            actual: err.to_string(),
        }
    }
}
