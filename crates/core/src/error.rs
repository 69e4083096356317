//! Core Error Types
//!
//! Error types shared by the Summarist workspace crates. Kept dependency-light
//! (thiserror + std) so the LLM crate can depend on core without pulling in
//! the application stack.
//!
//! The application crate wraps these in its own `AppError`, which adds the
//! request-boundary kinds (extraction, empty input, unsupported input).

use thiserror::Error;

/// Core error type for the Summarist workspace.
#[derive(Error, Debug)]
pub enum CoreError {
    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse errors
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type alias for core errors
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

impl From<CoreError> for String {
    fn from(err: CoreError) -> String {
        err.to_string()
    }
}
