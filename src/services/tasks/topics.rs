//! Topic modeling

use super::{join_partials, Combine, TaskStrategy, MARKDOWN_NOTE};

#[derive(Debug, Clone, Copy, Default)]
pub struct TopicsStrategy;

impl TaskStrategy for TopicsStrategy {
    fn name(&self) -> &'static str {
        "topics"
    }

    fn segment_instruction(&self, segment: &str) -> String {
        format!(
            "Detect the main topics in the following text and return an ordered list of topics \
             with 2-3 supporting bullets per topic. {}\n\nText:\n{}\n\nTopics:",
            MARKDOWN_NOTE, segment
        )
    }

    fn combine_instruction(&self, partials: &[String]) -> Combine {
        Combine::Synthesize(format!(
            "Merge and synthesize the partial topic lists into one final list of main topics, \
             deduplicating and adding 1-2 explanatory bullets per topic. Return Markdown.\n\n\
             Partial lists:\n{}\n\nFinal topics:",
            join_partials(partials)
        ))
    }
}
