//! Response Types
//!
//! Result shapes returned by the task service and printed by the driver.

use serde::{Deserialize, Serialize};

/// Envelope for every JSON answer the driver prints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> CommandResponse<T> {
    /// Create a successful response with data
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response with message
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

impl<T> From<Result<T, crate::utils::error::AppError>> for CommandResponse<T> {
    fn from(result: Result<T, crate::utils::error::AppError>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::err(e.to_string()),
        }
    }
}

/// Result of the summarize task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub summary: String,
    pub summary_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_filename: Option<String>,
    /// Length of the source text in characters
    pub length_original: usize,
    /// Length of the summary in characters
    pub length_summary: usize,
}

impl SummarizeResponse {
    pub fn new(
        summary: String,
        summary_type: impl Into<String>,
        original_filename: Option<String>,
        source: &str,
    ) -> Self {
        let length_summary = summary.chars().count();
        Self {
            summary,
            summary_type: summary_type.into(),
            original_filename,
            length_original: source.chars().count(),
            length_summary,
        }
    }
}

/// Result of every task other than summarize
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkdownResponse {
    pub markdown: String,
}

impl MarkdownResponse {
    pub fn new(markdown: impl Into<String>) -> Self {
        Self {
            markdown: markdown.into(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub provider: String,
    pub model: String,
}

impl HealthResponse {
    pub fn new(healthy: bool, provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            status: if healthy { "healthy" } else { "unavailable" }.to_string(),
            service: "summarist".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            provider: provider.into(),
            model: model.into(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Output of one `run_task` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskOutput {
    Summary(SummarizeResponse),
    Markdown(MarkdownResponse),
}

impl TaskOutput {
    /// The Final Result as Markdown, whatever the task.
    pub fn markdown(&self) -> &str {
        match self {
            TaskOutput::Summary(s) => &s.summary,
            TaskOutput::Markdown(m) => &m.markdown,
        }
    }

    pub fn into_markdown(self) -> String {
        match self {
            TaskOutput::Summary(s) => s.summary,
            TaskOutput::Markdown(m) => m.markdown,
        }
    }
}
