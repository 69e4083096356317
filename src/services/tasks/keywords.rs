//! Keyword extraction

use super::{join_partials, Combine, TaskStrategy};

#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordsStrategy;

impl TaskStrategy for KeywordsStrategy {
    fn name(&self) -> &'static str {
        "keywords"
    }

    fn segment_instruction(&self, segment: &str) -> String {
        format!(
            "Extract the most important keywords from the following text. \
             Return the result in Markdown as a bullet list (one word or phrase per bullet).\n\n\
             Text:\n{}\n\nKeywords:",
            segment
        )
    }

    fn combine_instruction(&self, partials: &[String]) -> Combine {
        Combine::Synthesize(format!(
            "Combine and deduplicate the following keyword lists. \
             Return the result in Markdown as a single bullet list ordered by relevance.\n\n\
             Partial lists:\n{}\n\nUnique keyword list:",
            join_partials(partials)
        ))
    }
}
