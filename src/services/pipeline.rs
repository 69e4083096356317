//! Chunk Pipeline
//!
//! Turns one document into one Final Result: segment, call the model once per
//! segment through the retry wrapper, then combine the ordered partials as the
//! task strategy directs.
//!
//! Segment calls run through an ordered buffered stream, so with a
//! concurrency limit above one several calls are in flight while the partial
//! sequence still comes back in segment order.

use futures_util::stream::{self, StreamExt, TryStreamExt};
use summarist_llm::RetryingGateway;
use tracing::{debug, info};

use crate::models::settings::AppConfig;
use crate::services::segmenter::Segmenter;
use crate::services::tasks::{Combine, TaskStrategy, CONCAT_DELIMITER};
use crate::utils::error::AppResult;

/// Joined partial length above which partials are merged in batches first.
pub const DEFAULT_MERGE_LIMIT: usize = 12_000;

/// One unit of work in a reduction round.
enum Pending {
    Keep(String),
    Call(String),
}

#[derive(Clone)]
pub struct ChunkPipeline {
    gateway: RetryingGateway,
    segmenter: Segmenter,
    merge_limit: usize,
    max_output_tokens: u32,
    concurrency: usize,
}

impl ChunkPipeline {
    pub fn new(gateway: RetryingGateway, max_size: usize, max_output_tokens: u32) -> Self {
        Self {
            gateway,
            segmenter: Segmenter::new(max_size),
            merge_limit: DEFAULT_MERGE_LIMIT,
            max_output_tokens,
            concurrency: 1,
        }
    }

    pub fn from_config(gateway: RetryingGateway, config: &AppConfig) -> Self {
        Self::new(gateway, config.chunk_size_chars, config.max_output_tokens)
            .with_concurrency(config.segment_concurrency)
            .with_merge_limit(config.merge_limit_chars)
    }

    /// Allow up to `limit` segment calls in flight at once.
    pub fn with_concurrency(mut self, limit: usize) -> Self {
        self.concurrency = limit.max(1);
        self
    }

    /// Merge partials in batches only while their joined length exceeds
    /// `limit` chars.
    pub fn with_merge_limit(mut self, limit: usize) -> Self {
        self.merge_limit = limit.max(1);
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    pub fn max_size(&self) -> usize {
        self.segmenter.max_size()
    }

    pub fn merge_limit(&self) -> usize {
        self.merge_limit
    }

    pub fn max_output_tokens(&self) -> u32 {
        self.max_output_tokens
    }

    /// Run `strategy` over `document`.
    ///
    /// Blank input yields `""` without touching the gateway.
    pub async fn run(&self, document: &str, strategy: &dyn TaskStrategy) -> AppResult<String> {
        if document.trim().is_empty() {
            return Ok(String::new());
        }

        let segments = self.segmenter.segment(document);
        info!(
            task = strategy.name(),
            document_chars = document.chars().count(),
            segments = segments.len(),
            max_size = self.max_size(),
            "running chunk pipeline"
        );

        let instructions: Vec<String> = match segments.as_slice() {
            [only] => vec![strategy.single_segment_instruction(only)],
            many => many.iter().map(|s| strategy.segment_instruction(s)).collect(),
        };
        let partials = self
            .run_all(instructions.into_iter().map(Pending::Call).collect())
            .await?;

        self.combine(partials, strategy).await
    }

    /// One retrying gateway call; the response is trimmed.
    pub async fn call(&self, instruction: &str) -> AppResult<String> {
        let text = self
            .gateway
            .invoke_with_retry(instruction, self.max_output_tokens)
            .await?;
        Ok(text.trim().to_string())
    }

    async fn combine(
        &self,
        mut partials: Vec<String>,
        strategy: &dyn TaskStrategy,
    ) -> AppResult<String> {
        if partials.len() <= 1 {
            return Ok(partials.pop().unwrap_or_default());
        }

        let mut combine = strategy.combine_instruction(&partials);
        if let Combine::Synthesize(_) = combine {
            if strategy.merges_recursively() && joined_len(&partials) > self.merge_limit {
                partials = self.reduce(partials, strategy).await?;
                combine = strategy.combine_instruction(&partials);
            }
        }

        match combine {
            Combine::Synthesize(instruction) => {
                info!(
                    task = strategy.name(),
                    partials = partials.len(),
                    "combining partial results"
                );
                self.call(&instruction).await
            }
            Combine::Concatenate => Ok(partials.join(strategy.concat_delimiter())),
        }
    }

    /// Merge partials in ordered batches until their joined length fits the
    /// merge limit or a round stops shrinking the sequence.
    async fn reduce(
        &self,
        mut partials: Vec<String>,
        strategy: &dyn TaskStrategy,
    ) -> AppResult<Vec<String>> {
        let mut round = 0;
        while joined_len(&partials) > self.merge_limit {
            let batches = batch_partials(&partials, self.merge_limit);
            if batches.len() >= partials.len() {
                break;
            }
            round += 1;
            debug!(
                task = strategy.name(),
                round,
                partials = partials.len(),
                batches = batches.len(),
                "reducing partial results"
            );

            let work = batches
                .into_iter()
                .map(|batch| match batch {
                    [single] => Pending::Keep(single.clone()),
                    many => match strategy.combine_instruction(many) {
                        Combine::Synthesize(instruction) => Pending::Call(instruction),
                        Combine::Concatenate => {
                            Pending::Keep(many.join(strategy.concat_delimiter()))
                        }
                    },
                })
                .collect();
            partials = self.run_all(work).await?;
        }
        Ok(partials)
    }

    /// Resolve every pending item, preserving input order.
    async fn run_all(&self, work: Vec<Pending>) -> AppResult<Vec<String>> {
        let total = work.len();
        stream::iter(work.into_iter().enumerate())
            .map(|(index, pending)| async move {
                match pending {
                    Pending::Keep(text) => Ok(text),
                    Pending::Call(instruction) => {
                        debug!(
                            index,
                            total,
                            instruction_chars = instruction.chars().count(),
                            "calling model"
                        );
                        self.call(&instruction).await
                    }
                }
            })
            .buffered(self.concurrency)
            .try_collect()
            .await
    }
}

fn joined_len(partials: &[String]) -> usize {
    let delimiter = CONCAT_DELIMITER.chars().count();
    partials.iter().map(|p| p.chars().count()).sum::<usize>()
        + delimiter * partials.len().saturating_sub(1)
}

/// Greedy in-order batching; a batch always holds at least one partial.
fn batch_partials(partials: &[String], limit: usize) -> Vec<&[String]> {
    let delimiter = CONCAT_DELIMITER.chars().count();
    let mut batches = Vec::new();
    let mut start = 0;
    let mut len = 0;
    for (i, partial) in partials.iter().enumerate() {
        let n = partial.chars().count();
        if i > start && len + delimiter + n > limit {
            batches.push(&partials[start..i]);
            start = i;
            len = n;
        } else if i == start {
            len = n;
        } else {
            len += delimiter + n;
        }
    }
    if start < partials.len() {
        batches.push(&partials[start..]);
    }
    batches
}
