//! Ollama Provider
//!
//! Implementation of the LlmProvider trait for Ollama local inference using
//! the ollama-rs native SDK. No API key is needed.

use std::time::Duration;

use async_trait::async_trait;
use ollama_rs::error::OllamaError;
use ollama_rs::generation::chat::request::ChatMessageRequest;
use ollama_rs::generation::chat::{ChatMessage, ChatMessageResponse, MessageRole as OllamaRole};
use ollama_rs::models::ModelOptions;
use ollama_rs::Ollama;

use super::provider::LlmProvider;
use super::types::{
    LlmError, LlmRequestOptions, LlmResponse, LlmResult, Message, MessageRole, ProviderConfig,
    StopReason, UsageStats,
};
use crate::http_client::build_http_client;

/// Default Ollama port when the base URL omits it
const OLLAMA_DEFAULT_PORT: u16 = 11434;

/// Ollama provider for local inference using the native ollama-rs SDK
pub struct OllamaProvider {
    config: ProviderConfig,
    client: Ollama,
}

impl OllamaProvider {
    /// Create a new Ollama provider with the given configuration.
    ///
    /// The SDK is handed our own reqwest client so the configured transport
    /// timeout and proxy apply to every chat call.
    pub fn new(config: ProviderConfig) -> LlmResult<Self> {
        let http_client = build_http_client(
            config.proxy.as_ref(),
            Duration::from_secs(config.timeout_secs),
        )?;
        let client = Self::create_client(config.resolved_base_url(), http_client)?;
        Ok(Self { config, client })
    }

    /// Create an Ollama SDK client from a base URL string.
    fn create_client(base_url: &str, http_client: reqwest::Client) -> LlmResult<Ollama> {
        let mut url = url::Url::parse(base_url).map_err(|e| LlmError::InvalidRequest {
            message: format!("invalid Ollama base URL '{}': {}", base_url, e),
        })?;
        if url.host_str().is_none() {
            return Err(LlmError::InvalidRequest {
                message: format!("invalid Ollama base URL '{}': missing host", base_url),
            });
        }
        if url.port().is_none() {
            url.set_port(Some(OLLAMA_DEFAULT_PORT)).map_err(|_| LlmError::InvalidRequest {
                message: format!("invalid Ollama base URL '{}': no port allowed", base_url),
            })?;
        }
        Ok(Ollama::builder().url(url).reqwest_client(http_client).build())
    }

    /// Get the base URL for the Ollama server (used in error messages)
    fn base_url(&self) -> &str {
        self.config.resolved_base_url()
    }

    /// Build a ChatMessageRequest from our unified types
    fn build_chat_request(
        &self,
        messages: &[Message],
        request_options: &LlmRequestOptions,
    ) -> ChatMessageRequest {
        let chat_messages: Vec<ChatMessage> =
            messages.iter().map(|m| self.convert_message(m)).collect();

        let temperature = request_options
            .temperature_override
            .unwrap_or(self.config.temperature);
        let max_tokens = request_options
            .max_tokens_override
            .unwrap_or(self.config.max_tokens);

        let mut opts = ModelOptions::default().temperature(temperature);
        if max_tokens > 0 {
            opts = opts.num_predict(max_tokens as i32);
        }

        ChatMessageRequest::new(self.config.model.clone(), chat_messages).options(opts)
    }

    fn convert_message(&self, message: &Message) -> ChatMessage {
        let role = match message.role {
            MessageRole::User => OllamaRole::User,
            MessageRole::Assistant => OllamaRole::Assistant,
            MessageRole::System => OllamaRole::System,
        };
        ChatMessage::new(role, message.content.clone())
    }

    /// Convert an ollama-rs ChatMessageResponse to our unified LlmResponse.
    fn convert_response(&self, response: &ChatMessageResponse) -> LlmResponse {
        let content = Some(response.message.content.clone());

        let usage = response
            .final_data
            .as_ref()
            .map(|data| UsageStats {
                input_tokens: data.prompt_eval_count as u32,
                output_tokens: data.eval_count as u32,
            })
            .unwrap_or_default();

        LlmResponse {
            content,
            stop_reason: StopReason::EndTurn,
            usage,
            model: response.model.clone(),
        }
    }

    /// Classify an SDK error by its message, as the SDK exposes no status.
    fn map_sdk_error(&self, err: OllamaError) -> LlmError {
        let msg = err.to_string();
        let lower = msg.to_lowercase();
        if lower.contains("connect") || lower.contains("connection refused") {
            LlmError::ProviderUnavailable {
                message: format!("Cannot connect to Ollama at {}: {}", self.base_url(), msg),
            }
        } else if lower.contains("not found") || lower.contains("404") {
            LlmError::ModelNotFound {
                model: self.config.model.clone(),
            }
        } else if lower.contains("decode") || lower.contains("deserializ") {
            LlmError::ParseError { message: msg }
        } else {
            LlmError::NetworkError { message: msg }
        }
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    fn name(&self) -> &'static str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn send_message(
        &self,
        messages: Vec<Message>,
        request_options: LlmRequestOptions,
    ) -> LlmResult<LlmResponse> {
        let request = self.build_chat_request(&messages, &request_options);

        let response = self
            .client
            .send_chat_messages(request)
            .await
            .map_err(|e| self.map_sdk_error(e))?;

        Ok(self.convert_response(&response))
    }

    async fn health_check(&self) -> LlmResult<()> {
        self.client
            .list_local_models()
            .await
            .map_err(|e| self.map_sdk_error(e))?;
        Ok(())
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn list_models(&self) -> LlmResult<Option<Vec<String>>> {
        let models = self
            .client
            .list_local_models()
            .await
            .map_err(|e| self.map_sdk_error(e))?;

        Ok(Some(models.into_iter().map(|m| m.name).collect()))
    }
}
