use serde::Serialize;

/// Errors raised at the edges of the crate: loading files, parsing documents
/// and reading configuration. The aggregation core itself never fails.
#[derive(Debug, thiserror::Error, Serialize)]
pub enum ServiceError {
    #[error("Configuration error: {0}")]
    ConfigError(
        #[from]
        #[serde(skip)]
        config::ConfigError,
    ),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(
        #[from]
        #[serde(skip)]
        serde_json::Error,
    ),

    #[error("I/O error: {0}")]
    IoError(
        #[from]
        #[serde(skip)]
        std::io::Error,
    ),
}

impl ServiceError {
    /// Short machine-readable code for the error kind
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::ConfigError(_) => "config_error",
            ServiceError::ValidationError(_) => "validation_error",
            ServiceError::InvalidInput(_) => "invalid_input",
            ServiceError::SerializationError(_) => "serialization_error",
            ServiceError::IoError(_) => "io_error",
        }
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::ValidationError(err.to_string())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
