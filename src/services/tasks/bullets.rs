//! Text to bullets

use super::{join_partials, Combine, TaskStrategy, MARKDOWN_NOTE};

/// Upper bound on bullets in the merged list.
pub const MAX_MERGED_BULLETS: usize = 12;

#[derive(Debug, Clone, Copy, Default)]
pub struct BulletsStrategy;

impl TaskStrategy for BulletsStrategy {
    fn name(&self) -> &'static str {
        "bullets"
    }

    fn segment_instruction(&self, segment: &str) -> String {
        format!(
            "Summarize the following text as clear, concise bullets. {}\n\nText:\n{}\n\nBullets:",
            MARKDOWN_NOTE, segment
        )
    }

    fn combine_instruction(&self, partials: &[String]) -> Combine {
        Combine::Synthesize(format!(
            "Combine the following partial bullet lists into a single concise list of at most {} bullets, \
             ordered by importance. Return Markdown.\n\n\
             Partial lists:\n{}\n\nCombined bullets:",
            MAX_MERGED_BULLETS,
            join_partials(partials)
        ))
    }
}
