//! Question answering
//!
//! Two stages. A document that fits in one segment is answered directly.
//! A longer one is first condensed segment by segment into short digests
//! focused on the question, and a single final call answers from the digests.

use super::{join_partials, Combine, TaskStrategy, MARKDOWN_NOTE};

#[derive(Debug, Clone)]
pub struct QuestionStrategy {
    question: String,
}

impl QuestionStrategy {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }
}

impl TaskStrategy for QuestionStrategy {
    fn name(&self) -> &'static str {
        "question"
    }

    fn segment_instruction(&self, segment: &str) -> String {
        format!(
            "Summarize the following fragment in 2-3 sentences, focusing on ideas that could help \
             answer a question about the document. Return only the summary.\n\n\
             Text:\n{}\n\nSummary:",
            segment
        )
    }

    fn single_segment_instruction(&self, segment: &str) -> String {
        format!(
            "Answer the following question about the provided text. {}\n\n\
             Text:\n{}\n\nQuestion: {}\n\nAnswer:",
            MARKDOWN_NOTE, segment, self.question
        )
    }

    fn combine_instruction(&self, partials: &[String]) -> Combine {
        Combine::Synthesize(format!(
            "Using the following combined summary of the document, answer the question. {}\n\n\
             Combined summary:\n{}\n\nQuestion: {}\n\nAnswer:",
            MARKDOWN_NOTE,
            join_partials(partials),
            self.question
        ))
    }

    /// The answer is always produced from every digest in one call.
    fn merges_recursively(&self) -> bool {
        false
    }
}
