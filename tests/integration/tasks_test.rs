//! Task Service Integration Tests
//!
//! Runs whole tasks through `TaskService` with a stub gateway: summary
//! styles, question answering, comparison and the request-boundary errors.

use summarist::models::{AppConfig, DocumentInput, Task, TaskOutput, TaskRequest};
use summarist::AppError;
use summarist_llm::LlmError;

use crate::support::{service, test_config, StubGateway};

fn config(dir: &tempfile::TempDir, chunk_size: usize) -> AppConfig {
    AppConfig {
        chunk_size_chars: chunk_size,
        ..test_config(dir.path())
    }
}

// ============================================================================
// Summarize
// ============================================================================

#[tokio::test]
async fn test_short_tldr_summary() {
    let dir = tempfile::tempdir().unwrap();
    let stub = StubGateway::fixed("  A fox jumps. Nothing else happens.  \n");
    let svc = service(&stub, config(&dir, 2500));

    let output = svc
        .run_task(
            DocumentInput::text("The quick brown fox jumps."),
            Task::summarize("tldr").into(),
        )
        .await
        .unwrap();

    assert_eq!(stub.calls(), 1);
    let prompt = stub.last_prompt();
    assert!(prompt.contains("ONLY TWO SENTENCES"));
    assert!(prompt.contains("The quick brown fox jumps."));

    let TaskOutput::Summary(summary) = output else {
        panic!("summarize returns a summary response");
    };
    assert_eq!(summary.summary, "A fox jumps. Nothing else happens.");
    assert_eq!(summary.summary_type, "tldr");
    assert_eq!(summary.length_original, 26);
    assert_eq!(summary.length_summary, summary.summary.chars().count());
    assert_eq!(summary.original_filename, None);
}

#[tokio::test]
async fn test_unknown_summary_type_uses_general_template() {
    let dir = tempfile::tempdir().unwrap();
    let stub = StubGateway::fixed("summary");
    let svc = service(&stub, config(&dir, 2500));

    let output = svc
        .run_task(DocumentInput::text("Some text."), Task::summarize("nonexistent").into())
        .await
        .unwrap();

    assert!(stub.last_prompt().starts_with("Write a professional, complete summary"));
    let TaskOutput::Summary(summary) = output else {
        panic!("summarize returns a summary response");
    };
    assert_eq!(summary.summary_type, "general");
}

#[tokio::test]
async fn test_oversized_document_costs_four_calls() {
    let dir = tempfile::tempdir().unwrap();
    let stub = StubGateway::new(|n, _| Ok(format!("part {}", n)));
    let svc = service(&stub, config(&dir, 2500));

    let output = svc
        .run_task(
            DocumentInput::text("0123456789".repeat(600)),
            Task::summarize("business").into(),
        )
        .await
        .unwrap();

    assert_eq!(stub.calls(), 4);
    assert_eq!(output.markdown(), "part 3");
    assert!(stub.last_prompt().contains("Business Implications"));
}

#[tokio::test]
async fn test_max_output_tokens_override_reaches_every_call() {
    let dir = tempfile::tempdir().unwrap();
    let stub = StubGateway::fixed("ok");
    let svc = service(&stub, config(&dir, 2500));

    let request = TaskRequest::new(Task::Bullets).with_max_output_tokens(64);
    let document = "abcdefghij".repeat(600);
    let output = svc.run_task(DocumentInput::text(document), request).await.unwrap();

    assert_eq!(output, TaskOutput::Markdown(summarist::MarkdownResponse::new("ok")));
    // Three segment calls and the combine call.
    assert_eq!(stub.token_limits(), vec![64, 64, 64, 64]);
}

#[tokio::test]
async fn test_configured_max_output_tokens_is_the_default_hint() {
    let dir = tempfile::tempdir().unwrap();
    let stub = StubGateway::fixed("ok");
    let svc = service(&stub, config(&dir, 2500));

    svc.run_task(DocumentInput::text("text"), Task::Keywords.into())
        .await
        .unwrap();

    assert_eq!(stub.token_limits(), vec![1024]);
}

// ============================================================================
// Question answering
// ============================================================================

#[tokio::test]
async fn test_short_question_answered_directly() {
    let dir = tempfile::tempdir().unwrap();
    let stub = StubGateway::fixed("Ada wrote it.");
    let svc = service(&stub, config(&dir, 2500));

    let output = svc
        .run_task(
            DocumentInput::text("This note was written by Ada."),
            Task::question("Who wrote it?").into(),
        )
        .await
        .unwrap();

    assert_eq!(output.markdown(), "Ada wrote it.");
    assert_eq!(stub.calls(), 1);
    let prompt = stub.last_prompt();
    assert!(prompt.starts_with("Answer the following question"));
    assert!(prompt.contains("Question: Who wrote it?"));
}

#[tokio::test]
async fn test_long_question_digests_then_answers() {
    let dir = tempfile::tempdir().unwrap();
    let stub = StubGateway::new(|n, prompt| {
        if prompt.contains("Combined summary:") {
            Ok("final answer".to_string())
        } else {
            Ok(format!("digest {}", n))
        }
    });
    // Small window so the digests alone exceed it; the answer must still be
    // a single call over all of them.
    let svc = service(&stub, config(&dir, 20));
    let document = (0..5)
        .map(|i| format!("paragraph {} text", i))
        .collect::<Vec<_>>()
        .join("\n");

    let output = svc
        .run_task(DocumentInput::text(document), Task::question("What is it about?").into())
        .await
        .unwrap();

    assert_eq!(output.markdown(), "final answer");
    assert_eq!(stub.calls(), 5 + 1);
    let answer_prompt = stub.last_prompt();
    assert!(answer_prompt.contains("digest 0\n\ndigest 1\n\ndigest 2\n\ndigest 3\n\ndigest 4"));
    assert!(answer_prompt.contains("Question: What is it about?"));
    assert!(stub.prompts()[..5].iter().all(|p| p.contains("2-3 sentences")));
}

#[tokio::test]
async fn test_blank_question_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let stub = StubGateway::echo();
    let svc = service(&stub, config(&dir, 2500));

    let err = svc
        .run_task(DocumentInput::text("text"), Task::question("   ").into())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::UnsupportedInput(_)));
    assert_eq!(stub.calls(), 0);
}

// ============================================================================
// Comparison
// ============================================================================

#[tokio::test]
async fn test_compare_short_documents_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let stub = StubGateway::fixed("They differ.");
    let svc = service(&stub, config(&dir, 2500));

    let input = DocumentInput::Many(vec![
        DocumentInput::text("Cats are independent."),
        DocumentInput::text("Dogs are loyal."),
    ]);
    let output = svc.run_task(input, Task::Compare.into()).await.unwrap();

    assert_eq!(output.markdown(), "They differ.");
    assert_eq!(stub.calls(), 1);
    let prompt = stub.last_prompt();
    assert!(prompt.contains("Text 1:\nCats are independent.\n\nText 2:\nDogs are loyal."));
}

#[tokio::test]
async fn test_compare_condenses_long_documents() {
    let dir = tempfile::tempdir().unwrap();
    let stub = StubGateway::new(|n, prompt| {
        if prompt.starts_with("Compare") {
            Ok("comparison".to_string())
        } else {
            Ok(format!("brief {}", n))
        }
    });
    let svc = service(&stub, config(&dir, 30));
    let long = format!("{}\n{}", "a".repeat(25), "b".repeat(25));

    let input =
        DocumentInput::Many(vec![DocumentInput::text("short one"), DocumentInput::text(long)]);
    let output = svc.run_task(input, Task::Compare.into()).await.unwrap();

    assert_eq!(output.markdown(), "comparison");
    // Two brief summaries for the long document, one comparison call.
    assert_eq!(stub.calls(), 3);
    let prompt = stub.last_prompt();
    assert!(prompt.contains("Text 1:\nshort one"));
    assert!(prompt.contains("Text 2:\nbrief 0\n\nbrief 1"));
}

#[tokio::test]
async fn test_compare_needs_two_documents() {
    let dir = tempfile::tempdir().unwrap();
    let stub = StubGateway::echo();
    let svc = service(&stub, config(&dir, 2500));

    let err = svc
        .run_task(DocumentInput::text("only one"), Task::Compare.into())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::UnsupportedInput(_)));
    assert!(err.is_client_error());
    assert_eq!(stub.calls(), 0);
}

// ============================================================================
// Other tasks and boundary errors
// ============================================================================

#[tokio::test]
async fn test_topics_over_several_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let stub = StubGateway::fixed("- Topic");
    let svc = service(&stub, config(&dir, 2500));

    let input = DocumentInput::Many(vec![
        DocumentInput::text("first text"),
        DocumentInput::Bytes(b"second \xff text".to_vec()),
    ]);
    svc.run_task(input, Task::Topics.into()).await.unwrap();

    let prompt = stub.last_prompt();
    assert!(prompt.contains("first text\n\nsecond \u{fffd} text"));
    assert!(prompt.contains("2-3 supporting bullets"));
}

#[tokio::test]
async fn test_keywords_and_entities_prompts() {
    let dir = tempfile::tempdir().unwrap();
    let stub = StubGateway::fixed("- item");
    let svc = service(&stub, config(&dir, 2500));

    svc.run_task(DocumentInput::text("Rust at Mozilla"), Task::Keywords.into())
        .await
        .unwrap();
    assert!(stub.last_prompt().contains("Keywords:"));

    svc.run_task(DocumentInput::text("Rust at Mozilla"), Task::Entities.into())
        .await
        .unwrap();
    assert!(stub.last_prompt().contains("- Name (Type)"));
}

#[tokio::test]
async fn test_blank_input_is_empty_input_error() {
    let dir = tempfile::tempdir().unwrap();
    let stub = StubGateway::echo();
    let svc = service(&stub, config(&dir, 2500));

    let err = svc
        .run_task(DocumentInput::text(" \n\t "), Task::Keywords.into())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::EmptyInput));
    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn test_gateway_failure_surfaces_after_retry() {
    let dir = tempfile::tempdir().unwrap();
    let stub = StubGateway::new(|_, _| {
        Err(LlmError::AuthenticationFailed {
            message: "bad key".to_string(),
        })
    });
    let svc = service(&stub, config(&dir, 2500));

    let err = svc
        .run_task(DocumentInput::text("text"), Task::Bullets.into())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Gateway(LlmError::AuthenticationFailed { .. })));
    assert!(!err.is_client_error());
    assert_eq!(stub.calls(), 2);
}
