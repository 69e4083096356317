//! Request Types
//!
//! What a caller hands to `TaskService::run_task`: the document(s) and the
//! task to perform on them.

use serde::{Deserialize, Serialize};

/// Raw document input as received at the request boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentInput {
    /// Already-decoded text
    Text(String),
    /// Raw bytes; decoded as UTF-8 with lossy substitution
    Bytes(Vec<u8>),
    /// An uploaded file, extracted by extension
    File { filename: String, bytes: Vec<u8> },
    /// Several inputs processed together
    Many(Vec<DocumentInput>),
}

impl DocumentInput {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn file(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self::File {
            filename: filename.into(),
            bytes,
        }
    }

    /// Name of the first uploaded file, if any.
    pub fn filename(&self) -> Option<&str> {
        match self {
            DocumentInput::File { filename, .. } => Some(filename),
            DocumentInput::Many(inputs) => inputs.iter().find_map(|i| i.filename()),
            _ => None,
        }
    }
}

/// Task identifier plus its parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "task", rename_all = "snake_case")]
pub enum Task {
    Summarize {
        /// Requested style; unknown values fall back to `general`
        #[serde(default = "default_summary_type")]
        summary_type: String,
    },
    Keywords,
    Entities,
    Topics,
    Bullets,
    Question {
        question: String,
    },
    Compare,
}

fn default_summary_type() -> String {
    "general".to_string()
}

impl Task {
    pub fn summarize(summary_type: impl Into<String>) -> Self {
        Task::Summarize {
            summary_type: summary_type.into(),
        }
    }

    pub fn question(question: impl Into<String>) -> Self {
        Task::Question {
            question: question.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Task::Summarize { .. } => "summarize",
            Task::Keywords => "keywords",
            Task::Entities => "entities",
            Task::Topics => "topics",
            Task::Bullets => "bullets",
            Task::Question { .. } => "question",
            Task::Compare => "compare",
        }
    }
}

/// One task invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRequest {
    #[serde(flatten)]
    pub task: Task,
    /// Output-length hint; the configured default applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

impl TaskRequest {
    pub fn new(task: Task) -> Self {
        Self {
            task,
            max_output_tokens: None,
        }
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }
}

impl From<Task> for TaskRequest {
    fn from(task: Task) -> Self {
        Self::new(task)
    }
}
