//! Task Strategies
//!
//! Each task supplies the instructions the chunk pipeline sends: one per
//! segment, and optionally one that merges the ordered partial results.
//! Strategies are stateless values selected by [`Task`](crate::models::Task).

pub mod bullets;
pub mod compare;
pub mod entities;
pub mod keywords;
pub mod question;
pub mod summarize;
pub mod topics;

pub use bullets::BulletsStrategy;
pub use compare::{compare_documents, BriefSummaryStrategy};
pub use entities::EntitiesStrategy;
pub use keywords::KeywordsStrategy;
pub use question::QuestionStrategy;
pub use summarize::{SummarizeStrategy, SummaryType};
pub use topics::TopicsStrategy;

use crate::models::Task;

/// Default visible delimiter used when partials are concatenated.
pub const CONCAT_DELIMITER: &str = "\n\n---\n\n";

/// Output constraint appended to free-form Markdown tasks.
pub(crate) const MARKDOWN_NOTE: &str =
    "Return the result as a well-organized, visually clear Markdown document.";

/// How the pipeline merges more than one partial result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Combine {
    /// Send this instruction to the model; its answer is the Final Result.
    Synthesize(String),
    /// Join the partials in order with the strategy's delimiter; no model call.
    Concatenate,
}

pub trait TaskStrategy: Send + Sync {
    /// Task identifier used in logs.
    fn name(&self) -> &'static str;

    /// Instruction for one segment of a multi-segment document.
    fn segment_instruction(&self, segment: &str) -> String;

    /// Instruction when the whole document is a single segment.
    fn single_segment_instruction(&self, segment: &str) -> String {
        self.segment_instruction(segment)
    }

    /// Merge step over the ordered partials.
    fn combine_instruction(&self, _partials: &[String]) -> Combine {
        Combine::Concatenate
    }

    /// Delimiter for [`Combine::Concatenate`].
    fn concat_delimiter(&self) -> &'static str {
        CONCAT_DELIMITER
    }

    /// Whether oversized partial sets may be merged in batches first.
    fn merges_recursively(&self) -> bool {
        true
    }
}

/// Join partials the way merge instructions quote them.
pub(crate) fn join_partials(partials: &[String]) -> String {
    partials.join("\n\n")
}

/// Strategy for a single-document task; `None` for compare, which works
/// over whole documents.
pub fn strategy_for(task: &Task) -> Option<Box<dyn TaskStrategy>> {
    let strategy: Box<dyn TaskStrategy> = match task {
        Task::Summarize { summary_type } => {
            Box::new(SummarizeStrategy::new(SummaryType::parse(summary_type)))
        }
        Task::Keywords => Box::new(KeywordsStrategy),
        Task::Entities => Box::new(EntitiesStrategy),
        Task::Topics => Box::new(TopicsStrategy),
        Task::Bullets => Box::new(BulletsStrategy),
        Task::Question { question } => Box::new(QuestionStrategy::new(question.clone())),
        Task::Compare => return None,
    };
    Some(strategy)
}
