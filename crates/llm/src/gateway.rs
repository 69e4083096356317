//! Model Gateway
//!
//! The narrow seam the pipeline talks to: one prompt in, one text out. The
//! production implementation adapts any [`LlmProvider`]; tests substitute
//! their own implementations.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::ollama::OllamaProvider;
use crate::openai::OpenAIProvider;
use crate::provider::LlmProvider;
use crate::types::{
    LlmError, LlmRequestOptions, LlmResult, Message, ProviderConfig, ProviderType,
};

/// Sends one instruction to the model service and returns its raw text.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Send `prompt` as a single user message with an output-length hint.
    ///
    /// The returned text is verbatim; trimming is left to the caller.
    async fn invoke(&self, prompt: &str, max_output_tokens: u32) -> LlmResult<String>;
}

/// Gateway backed by a concrete provider.
pub struct ProviderGateway {
    provider: Arc<dyn LlmProvider>,
}

impl ProviderGateway {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Build the provider named in `config` and wrap it.
    pub fn from_config(config: ProviderConfig) -> LlmResult<Self> {
        Ok(Self::new(create_provider(config)?))
    }

    pub fn provider(&self) -> &Arc<dyn LlmProvider> {
        &self.provider
    }
}

#[async_trait]
impl ModelGateway for ProviderGateway {
    async fn invoke(&self, prompt: &str, max_output_tokens: u32) -> LlmResult<String> {
        debug!(
            provider = self.provider.name(),
            model = self.provider.model(),
            prompt_chars = prompt.chars().count(),
            max_output_tokens,
            "invoking model"
        );

        let options = LlmRequestOptions {
            max_tokens_override: Some(max_output_tokens),
            ..Default::default()
        };
        let response = self
            .provider
            .send_message(vec![Message::user(prompt)], options)
            .await?;

        response.content.ok_or_else(|| LlmError::ParseError {
            message: format!("{} returned no text content", self.provider.name()),
        })
    }
}

/// Instantiate the provider selected by `config.provider`.
pub fn create_provider(config: ProviderConfig) -> LlmResult<Arc<dyn LlmProvider>> {
    let provider: Arc<dyn LlmProvider> = match config.provider {
        ProviderType::Ollama => Arc::new(OllamaProvider::new(config)?),
        ProviderType::OpenAI => Arc::new(OpenAIProvider::new(config)?),
    };
    Ok(provider)
}
