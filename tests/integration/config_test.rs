//! Configuration Integration Tests

use std::collections::HashMap;

use summarist::models::{AppConfig, DocumentInput, Task};
use summarist::services::TaskService;
use summarist::AppError;
use summarist_llm::{LlmError, ProviderType};

fn from_pairs(pairs: &[(&str, &str)]) -> Result<AppConfig, AppError> {
    let map: HashMap<&str, &str> = pairs.iter().copied().collect();
    AppConfig::from_lookup(|key| map.get(key).map(|v| v.to_string()))
}

#[test]
fn test_defaults() {
    let config = from_pairs(&[]).unwrap();
    assert_eq!(config.provider, ProviderType::Ollama);
    assert_eq!(config.model, "llama3.1:latest");
    assert!(config.base_url.is_none());
    assert!((config.temperature - 0.2).abs() < f32::EPSILON);
    assert_eq!(config.timeout_secs, 600);
    assert_eq!(config.chunk_size_chars, 2500);
    assert_eq!(config.max_output_tokens, 1024);
    assert_eq!(config.max_upload_bytes, 10_485_760);
    assert_eq!(config.segment_concurrency, 1);
    assert_eq!(config.retry.max_attempts, 2);
    assert_eq!(config.retry.backoff_ms, 1000);
}

#[test]
fn test_blank_values_keep_defaults() {
    let config = from_pairs(&[("CHUNK_SIZE_CHARS", "  "), ("LLM_MODEL", "")]).unwrap();
    assert_eq!(config.chunk_size_chars, 2500);
    assert_eq!(config.model, "llama3.1:latest");
}

#[test]
fn test_invalid_values_rejected() {
    for (key, value) in [
        ("CHUNK_SIZE_CHARS", "0"),
        ("LLM_TEMPERATURE", "-1"),
        ("LLM_PROVIDER", "bard"),
        ("MAX_OUTPUT_TOKENS", "many"),
        ("SEGMENT_CONCURRENCY", "0"),
    ] {
        let err = from_pairs(&[(key, value)]).unwrap_err();
        assert!(matches!(err, AppError::Config(_)), "{}={} should be rejected", key, value);
    }
}

#[test]
fn test_provider_config_uses_provider_default_url() {
    let config = from_pairs(&[("LLM_PROVIDER", "openai"), ("LLM_MODEL", "gpt-4o-mini")]).unwrap();
    let provider = config.provider_config().unwrap();
    assert_eq!(provider.resolved_base_url(), "https://api.openai.com/v1");
    assert_eq!(provider.model, "gpt-4o-mini");
}

#[tokio::test]
async fn test_missing_credential_is_gateway_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        tmp_dir: dir.path().to_path_buf(),
        ..from_pairs(&[("LLM_PROVIDER", "openai"), ("RETRY_BACKOFF_MS", "0")]).unwrap()
    };
    let svc = TaskService::new(config).unwrap();

    let err = svc
        .run_task(DocumentInput::text("hello"), Task::Keywords.into())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Gateway(LlmError::AuthenticationFailed { .. })));
}
