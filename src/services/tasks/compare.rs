//! Text comparison
//!
//! Works over whole documents. Each document longer than the segment size is
//! condensed first through the chunk pipeline; the resulting texts are then
//! compared in one model call.

use tracing::info;

use super::{Combine, TaskStrategy, MARKDOWN_NOTE};
use crate::services::pipeline::ChunkPipeline;
use crate::utils::error::{AppError, AppResult};

/// Brief per-segment summary used to condense long documents before a
/// comparison. Digests are joined with blank lines, not merged by the model.
#[derive(Debug, Clone, Copy, Default)]
pub struct BriefSummaryStrategy;

impl TaskStrategy for BriefSummaryStrategy {
    fn name(&self) -> &'static str {
        "brief_summary"
    }

    fn segment_instruction(&self, segment: &str) -> String {
        format!(
            "Summarize the following text in 2-3 sentences, keeping the key points. \
             Return only the summary.\n\nText:\n{}\n\nSummary:",
            segment
        )
    }

    fn combine_instruction(&self, _partials: &[String]) -> Combine {
        Combine::Concatenate
    }

    fn concat_delimiter(&self) -> &'static str {
        "\n\n"
    }
}

/// Build the comparison instruction over already-condensed texts.
pub fn comparison_instruction(texts: &[String]) -> String {
    let numbered = texts
        .iter()
        .enumerate()
        .map(|(i, text)| format!("Text {}:\n{}", i + 1, text))
        .collect::<Vec<_>>()
        .join("\n\n");
    format!(
        "Compare the following texts and analyze their similarities and differences. {}\n\n{}\n\nComparison summary:",
        MARKDOWN_NOTE, numbered
    )
}

/// Compare two or more documents.
pub async fn compare_documents(
    pipeline: &ChunkPipeline,
    documents: &[String],
) -> AppResult<String> {
    if documents.len() < 2 {
        return Err(AppError::unsupported(format!(
            "comparison needs at least two documents, got {}",
            documents.len()
        )));
    }

    let mut texts = Vec::with_capacity(documents.len());
    for (i, document) in documents.iter().enumerate() {
        if document.chars().count() <= pipeline.max_size() {
            texts.push(document.clone());
        } else {
            info!(document = i + 1, "condensing long document before comparison");
            texts.push(pipeline.run(document, &BriefSummaryStrategy).await?);
        }
    }

    pipeline.call(&comparison_instruction(&texts)).await
}
