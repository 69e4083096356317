//! Error Handling
//!
//! Unified error types for the request boundary.
//! Uses thiserror for ergonomic error definitions.

use summarist_core::CoreError;
use summarist_llm::LlmError;
use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Text could not be extracted from an uploaded file
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// The supplied or extracted text is blank
    #[error("No text could be extracted from the document")]
    EmptyInput,

    /// Unsupported file type or task parameter
    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),

    /// Upload exceeds the configured ceiling
    #[error("File too large: {size} bytes exceeds the {limit} byte limit")]
    PayloadTooLarge { size: u64, limit: u64 },

    /// The model service failed after retry
    #[error("Model gateway error: {0}")]
    Gateway(#[from] LlmError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create an extraction error
    pub fn extraction(msg: impl Into<String>) -> Self {
        Self::Extraction(msg.into())
    }

    /// Create an unsupported-input error
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::UnsupportedInput(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the caller can fix this by changing the request.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::Extraction(_)
                | AppError::EmptyInput
                | AppError::UnsupportedInput(_)
                | AppError::PayloadTooLarge { .. }
        )
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Io(e) => AppError::Io(e),
            CoreError::Parse(msg) => AppError::Config(format!("Parse error: {}", msg)),
        }
    }
}

impl From<AppError> for String {
    fn from(err: AppError) -> String {
        err.to_string()
    }
}
