//! Summarist LLM
//!
//! Unified access to the language-model service used by the summarization
//! pipeline:
//! - Ollama (local inference, native SDK)
//! - Any OpenAI-compatible chat-completions endpoint (OpenAI, Groq, ...)
//!
//! On top of the providers sit the [`ModelGateway`] seam (one prompt in, one
//! text out) and the [`RetryingGateway`] bounded-retry wrapper.

pub mod gateway;
pub mod http_client;
pub mod ollama;
pub mod openai;
pub mod provider;
pub mod retry;
pub mod types;

// Re-export main types
pub use gateway::{create_provider, ModelGateway, ProviderGateway};
pub use http_client::build_http_client;
pub use ollama::OllamaProvider;
pub use openai::OpenAIProvider;
pub use provider::LlmProvider;
pub use retry::{RetryPolicy, RetryingGateway};
pub use types::*;
