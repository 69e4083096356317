//! Chunk Pipeline Integration Tests
//!
//! Drives the pipeline with stub gateways: empty input, single-segment
//! passthrough, ordering under concurrency, retry ceiling, call counts,
//! concatenation and recursive merging.

use std::time::Duration;

use summarist::services::tasks::{SummarizeStrategy, SummaryType};
use summarist::services::{ChunkPipeline, Combine, TaskStrategy};
use summarist::AppError;
use summarist_llm::{LlmError, RetryPolicy};

use crate::support::{instant_retry, retrying, StubGateway};

/// Wraps segments and partials in recognizable markers.
struct Wrapping;

impl TaskStrategy for Wrapping {
    fn name(&self) -> &'static str {
        "wrapping"
    }
    fn segment_instruction(&self, segment: &str) -> String {
        format!("SEG[{}]", segment)
    }
    fn combine_instruction(&self, partials: &[String]) -> Combine {
        Combine::Synthesize(format!("COMBINE[{}]", partials.join("|")))
    }
}

/// Same segment instructions, default concatenation.
struct Concatenating;

impl TaskStrategy for Concatenating {
    fn name(&self) -> &'static str {
        "concatenating"
    }
    fn segment_instruction(&self, segment: &str) -> String {
        format!("SEG[{}]", segment)
    }
}

/// Three 24-char lines; with a window of 25 each line is one segment.
fn three_line_document() -> String {
    format!(
        "one-{}\ntwo-{}\nthree-{}",
        "a".repeat(20),
        "b".repeat(20),
        "c".repeat(18)
    )
}

fn marker_for(prompt: &str) -> &'static str {
    if prompt.contains("one-") {
        "M1"
    } else if prompt.contains("two-") {
        "M2"
    } else {
        "M3"
    }
}

// ============================================================================
// Empty input and single segment
// ============================================================================

#[tokio::test]
async fn test_empty_input_makes_no_calls() {
    let stub = StubGateway::echo();
    let pipeline = ChunkPipeline::new(retrying(&stub, instant_retry()), 2500, 1024);

    assert_eq!(pipeline.run("", &Wrapping).await.unwrap(), "");
    assert_eq!(pipeline.run("   \n\t ", &Wrapping).await.unwrap(), "");
    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn test_single_segment_passthrough() {
    let stub = StubGateway::echo();
    let pipeline = ChunkPipeline::new(retrying(&stub, instant_retry()), 2500, 1024);

    let result = pipeline.run("  short document \n", &Wrapping).await.unwrap();

    assert_eq!(result, "SEG[short document]");
    assert_eq!(stub.calls(), 1);
    assert!(stub.prompts().iter().all(|p| !p.starts_with("COMBINE")));
}

#[tokio::test]
async fn test_partial_results_are_trimmed() {
    let stub = StubGateway::fixed("\n\n  answer  \n");
    let pipeline = ChunkPipeline::new(retrying(&stub, instant_retry()), 2500, 1024);
    assert_eq!(pipeline.run("text", &Wrapping).await.unwrap(), "answer");
}

// ============================================================================
// Ordering
// ============================================================================

#[tokio::test]
async fn test_combine_sees_partials_in_segment_order() {
    let stub = StubGateway::new(|_, prompt| {
        if prompt.starts_with("COMBINE") {
            Ok("final".to_string())
        } else {
            Ok(format!(" {} ", marker_for(prompt)))
        }
    });
    let pipeline = ChunkPipeline::new(retrying(&stub, instant_retry()), 25, 1024);

    let result = pipeline.run(&three_line_document(), &Wrapping).await.unwrap();

    assert_eq!(result, "final");
    assert_eq!(stub.calls(), 4);
    assert_eq!(stub.last_prompt(), "COMBINE[M1|M2|M3]");
}

#[tokio::test(start_paused = true)]
async fn test_ordering_holds_when_completions_are_reversed() {
    let stub = StubGateway::with_delay(
        |_, prompt| {
            if prompt.starts_with("COMBINE") {
                Ok("final".to_string())
            } else {
                Ok(marker_for(prompt).to_string())
            }
        },
        |prompt| match marker_for(prompt) {
            _ if prompt.starts_with("COMBINE") => Duration::ZERO,
            "M1" => Duration::from_millis(30),
            "M2" => Duration::from_millis(20),
            _ => Duration::from_millis(10),
        },
    );
    let pipeline =
        ChunkPipeline::new(retrying(&stub, instant_retry()), 25, 1024).with_concurrency(3);

    let result = pipeline.run(&three_line_document(), &Wrapping).await.unwrap();

    assert_eq!(result, "final");
    // Segment calls finished last-to-first...
    assert_eq!(&stub.completed()[..3], &["M3", "M2", "M1"]);
    // ...but the combine step still reads them in document order.
    assert_eq!(stub.last_prompt(), "COMBINE[M1|M2|M3]");
}

// ============================================================================
// Retry ceiling
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_single_failure_is_retried() {
    let stub = StubGateway::flaky(1, "recovered");
    let pipeline = ChunkPipeline::new(retrying(&stub, RetryPolicy::default()), 2500, 1024);

    let result = pipeline.run("document", &Wrapping).await.unwrap();

    assert_eq!(result, "recovered");
    assert_eq!(stub.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_second_failure_propagates() {
    let stub = StubGateway::flaky(usize::MAX, "never");
    let pipeline = ChunkPipeline::new(retrying(&stub, RetryPolicy::default()), 2500, 1024);

    let err = pipeline.run("document", &Wrapping).await.unwrap_err();

    assert!(matches!(
        err,
        AppError::Gateway(LlmError::ServerError { status: Some(503), .. })
    ));
    assert_eq!(stub.calls(), 2, "no third attempt");
}

#[tokio::test]
async fn test_failure_in_combine_returns_no_partial_result() {
    let stub = StubGateway::new(|_, prompt| {
        if prompt.starts_with("COMBINE") {
            Err(LlmError::NetworkError {
                message: "connection reset".to_string(),
            })
        } else {
            Ok(marker_for(prompt).to_string())
        }
    });
    let pipeline = ChunkPipeline::new(retrying(&stub, instant_retry()), 25, 1024);

    let err = pipeline.run(&three_line_document(), &Wrapping).await.unwrap_err();
    assert!(err.to_string().contains("connection reset"));
    assert_eq!(stub.calls(), 3 + 2);
}

// ============================================================================
// Call counts and combine variants
// ============================================================================

#[tokio::test]
async fn test_oversized_summary_uses_three_segments_and_one_combine() {
    let stub = StubGateway::new(|n, _| Ok(format!("partial {}", n)));
    let pipeline = ChunkPipeline::new(retrying(&stub, instant_retry()), 2500, 1024);
    let document = "abcdefghij".repeat(600);
    assert_eq!(document.len(), 6000);

    let strategy = SummarizeStrategy::new(SummaryType::General);
    let result = pipeline.run(&document, &strategy).await.unwrap();

    assert_eq!(stub.calls(), 4);
    assert_eq!(result, "partial 3");
    let synthesis = stub.last_prompt();
    assert!(synthesis.contains("partial 0\n\n---\n\npartial 1\n\n---\n\npartial 2"));
}

#[tokio::test]
async fn test_long_partials_still_take_one_combine() {
    // Realistic partial summaries: three of them overflow the segment size
    // but stay well under the merge limit.
    let stub = StubGateway::new(|n, _| Ok(format!("{}{}", n, "s".repeat(1000))));
    let pipeline = ChunkPipeline::new(retrying(&stub, instant_retry()), 2500, 1024);
    let document = "abcdefghij".repeat(600);

    let strategy = SummarizeStrategy::new(SummaryType::General);
    let result = pipeline.run(&document, &strategy).await.unwrap();

    assert_eq!(stub.calls(), 4);
    assert!(result.starts_with('3'));
    let synthesis = stub.last_prompt();
    assert!(synthesis.contains(&format!("0{}", "s".repeat(1000))));
    assert!(synthesis.contains(&format!("2{}", "s".repeat(1000))));
}

#[tokio::test]
async fn test_merge_limit_triggers_batch_round() {
    let stub = StubGateway::new(|n, _| Ok(format!("{}{}", n, "s".repeat(1000))));
    let pipeline =
        ChunkPipeline::new(retrying(&stub, instant_retry()), 2500, 1024).with_merge_limit(2500);
    let document = "abcdefghij".repeat(600);

    let strategy = SummarizeStrategy::new(SummaryType::General);
    pipeline.run(&document, &strategy).await.unwrap();

    // 3 segments, one batch merge of the first two partials, one final combine.
    assert_eq!(stub.calls(), 5);
}

#[tokio::test]
async fn test_concatenate_joins_with_rule_and_skips_combine() {
    let stub = StubGateway::new(|_, prompt| Ok(marker_for(prompt).to_string()));
    let pipeline = ChunkPipeline::new(retrying(&stub, instant_retry()), 25, 1024);

    let result = pipeline.run(&three_line_document(), &Concatenating).await.unwrap();

    assert_eq!(result, "M1\n\n---\n\nM2\n\n---\n\nM3");
    assert_eq!(stub.calls(), 3);
}

#[tokio::test]
async fn test_recursive_merge_ends_with_one_combine() {
    // Ten 29-char lines, window 30: one segment per line.
    let document = (0..10)
        .map(|i| format!("line{:02}-{}", i, "x".repeat(22)))
        .collect::<Vec<_>>()
        .join("\n");
    let stub = StubGateway::new(|_, prompt| {
        if let Some(rest) = prompt.strip_prefix("SEG[line") {
            Ok(format!("part-{}", &rest[..2]))
        } else {
            Ok("merged".to_string())
        }
    });
    let pipeline =
        ChunkPipeline::new(retrying(&stub, instant_retry()), 30, 1024).with_merge_limit(30);

    let result = pipeline.run(&document, &Wrapping).await.unwrap();
    assert_eq!(result, "merged");

    let prompts = stub.prompts();
    let segment_calls = prompts.iter().filter(|p| p.starts_with("SEG[")).count();
    let combine_calls: Vec<&String> =
        prompts.iter().filter(|p| p.starts_with("COMBINE[")).collect();

    assert_eq!(segment_calls, 10);
    // Round 1: 10 -> 5, round 2: 5 -> 3, round 3: 3 -> 2, then the final call.
    assert_eq!(combine_calls.len(), 5 + 2 + 1 + 1);
    assert_eq!(combine_calls[0], "COMBINE[part-00|part-01]");
    assert_eq!(combine_calls[4], "COMBINE[part-08|part-09]");
    assert_eq!(combine_calls.last().unwrap().as_str(), "COMBINE[merged|merged]");
}
