//! Settings Models
//!
//! Process-wide configuration. Built once at startup (`AppConfig::from_env`)
//! and passed by reference into the gateway and pipeline constructors.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use summarist_core::ProxyConfig;
use summarist_llm::{ProviderConfig, ProviderType, RetryPolicy};

use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::default_tmp_dir;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Model service flavor
    #[serde(default = "default_provider")]
    pub provider: ProviderType,
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Service base URL; the provider default applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// API credential. Never serialized.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Transport timeout per model call, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Outbound proxy URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,
    /// Segment size in characters
    #[serde(default = "default_chunk_size")]
    pub chunk_size_chars: usize,
    /// Joined partial length above which partials are merged in batches
    /// before the final combine call
    #[serde(default = "default_merge_limit_chars")]
    pub merge_limit_chars: usize,
    /// Default output-length hint
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    /// Maximum accepted upload size in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
    /// Staging directory for uploads
    #[serde(default = "default_tmp_dir")]
    pub tmp_dir: PathBuf,
    /// Concurrent segment calls within one request
    #[serde(default = "default_segment_concurrency")]
    pub segment_concurrency: usize,
    /// Retry policy for every model call
    #[serde(default)]
    pub retry: RetryPolicy,
}

fn default_provider() -> ProviderType {
    ProviderType::Ollama
}

fn default_model() -> String {
    "llama3.1:latest".to_string()
}

fn default_temperature() -> f32 {
    0.2
}

fn default_timeout_secs() -> u64 {
    600
}

fn default_chunk_size() -> usize {
    2500
}

fn default_merge_limit_chars() -> usize {
    12_000
}

fn default_max_output_tokens() -> u32 {
    1024
}

fn default_max_upload_bytes() -> u64 {
    10 * 1024 * 1024
}

fn default_segment_concurrency() -> usize {
    1
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            base_url: None,
            api_key: None,
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
            proxy: None,
            chunk_size_chars: default_chunk_size(),
            merge_limit_chars: default_merge_limit_chars(),
            max_output_tokens: default_max_output_tokens(),
            max_upload_bytes: default_max_upload_bytes(),
            tmp_dir: default_tmp_dir(),
            segment_concurrency: default_segment_concurrency(),
            retry: RetryPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Unset or blank variables keep their defaults; malformed values are
    /// configuration errors.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = AppConfig::default();

        if let Some(name) = get("LLM_PROVIDER") {
            config.provider = ProviderType::from_name(&name).ok_or_else(|| {
                AppError::config(format!(
                    "LLM_PROVIDER: unknown provider '{}' (expected ollama or openai)",
                    name
                ))
            })?;
        }
        if let Some(model) = get("LLM_MODEL").or_else(|| get("OLLAMA_MODEL")) {
            config.model = model;
        }
        config.base_url = get("LLM_BASE_URL").or_else(|| get("OLLAMA_BASE_URL"));
        config.api_key = get("LLM_API_KEY");
        config.proxy = get("LLM_PROXY");

        if let Some(v) = get("LLM_TEMPERATURE") {
            config.temperature = parse_var("LLM_TEMPERATURE", &v)?;
        }
        if let Some(v) = get("LLM_TIMEOUT_SECS") {
            config.timeout_secs = parse_var("LLM_TIMEOUT_SECS", &v)?;
        }
        if let Some(v) = get("CHUNK_SIZE_CHARS") {
            config.chunk_size_chars = parse_var("CHUNK_SIZE_CHARS", &v)?;
        }
        if let Some(v) = get("MERGE_LIMIT_CHARS") {
            config.merge_limit_chars = parse_var("MERGE_LIMIT_CHARS", &v)?;
        }
        if let Some(v) = get("MAX_OUTPUT_TOKENS") {
            config.max_output_tokens = parse_var("MAX_OUTPUT_TOKENS", &v)?;
        }
        if let Some(v) = get("MAX_UPLOAD_BYTES") {
            config.max_upload_bytes = parse_var("MAX_UPLOAD_BYTES", &v)?;
        }
        if let Some(v) = get("TMP_DIR") {
            config.tmp_dir = PathBuf::from(v);
        }
        if let Some(v) = get("SEGMENT_CONCURRENCY") {
            config.segment_concurrency = parse_var("SEGMENT_CONCURRENCY", &v)?;
        }
        if let Some(v) = get("RETRY_MAX_ATTEMPTS") {
            config.retry.max_attempts = parse_var("RETRY_MAX_ATTEMPTS", &v)?;
        }
        if let Some(v) = get("RETRY_BACKOFF_MS") {
            config.retry.backoff_ms = parse_var("RETRY_BACKOFF_MS", &v)?;
        }

        config.validate().map_err(AppError::config)?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }

        if self.chunk_size_chars == 0 {
            return Err("chunk_size_chars must be at least 1".to_string());
        }

        if self.merge_limit_chars == 0 {
            return Err("merge_limit_chars must be at least 1".to_string());
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            ));
        }

        if self.max_output_tokens == 0 {
            return Err("max_output_tokens must be at least 1".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be at least 1".to_string());
        }

        if self.max_upload_bytes == 0 {
            return Err("max_upload_bytes must be at least 1".to_string());
        }

        if self.segment_concurrency == 0 {
            return Err("segment_concurrency must be at least 1".to_string());
        }

        if self.retry.max_attempts == 0 {
            return Err("retry.max_attempts must be at least 1".to_string());
        }

        if let Some(proxy) = &self.proxy {
            ProxyConfig::parse(proxy).map_err(|e| e.to_string())?;
        }

        Ok(())
    }

    /// Provider configuration derived from these settings.
    pub fn provider_config(&self) -> AppResult<ProviderConfig> {
        let proxy = self
            .proxy
            .as_deref()
            .map(ProxyConfig::parse)
            .transpose()?;

        Ok(ProviderConfig {
            provider: self.provider,
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            max_tokens: self.max_output_tokens,
            temperature: self.temperature,
            timeout_secs: self.timeout_secs,
            proxy,
        })
    }
}

fn parse_var<T>(key: &str, raw: &str) -> AppResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| AppError::config(format!("{}: invalid value '{}': {}", key, raw, e)))
}
