//! Services
//!
//! The chunk-dispatch-combine pipeline and everything around it: segmenting,
//! task strategies, file extraction, upload staging and the task service
//! that ties them together.

pub mod extractor;
pub mod pipeline;
pub mod segmenter;
pub mod task_service;
pub mod tasks;
pub mod upload;

pub use extractor::{DocumentExtractor, Extractor};
pub use pipeline::ChunkPipeline;
pub use segmenter::{segment, Segmenter};
pub use task_service::TaskService;
pub use tasks::{Combine, TaskStrategy};
pub use upload::StagedUpload;
