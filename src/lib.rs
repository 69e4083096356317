//! Summarist - Document Summarization Backend
//!
//! Summarizes and analyzes long documents with a language model by splitting
//! them into bounded segments, sending one instruction per segment and
//! combining the ordered partial results. It includes:
//! - Segmenter and chunk pipeline
//! - Task strategies (summarize, keywords, entities, topics, bullets,
//!   question answering, comparison)
//! - PDF / DOCX / plain-text extraction with scoped upload staging
//! - Configuration, request and response models

pub mod models;
pub mod services;
pub mod utils;

pub use models::request::{DocumentInput, Task, TaskRequest};
pub use models::response::*;
pub use models::settings::AppConfig;
pub use services::{ChunkPipeline, TaskService};
pub use utils::error::{AppError, AppResult};
