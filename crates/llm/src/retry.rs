//! Retry Wrapper
//!
//! Bounded retry around a single gateway call: fixed backoff, no jitter, and
//! by default exactly one retry (two attempts in total).

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::gateway::ModelGateway;
use crate::types::LlmResult;

/// Retry policy for gateway calls.
///
/// The default (`max_attempts = 2`, one second backoff) fixes the cost and
/// latency profile of every task; raising it multiplies worst-case calls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Fixed delay between attempts in milliseconds
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,
}

fn default_max_attempts() -> u32 {
    2
}

fn default_backoff_ms() -> u64 {
    1000
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_ms: default_backoff_ms(),
        }
    }
}

impl RetryPolicy {
    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }

    /// Attempts actually made; zero is treated as one.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// A gateway paired with its retry policy.
#[derive(Clone)]
pub struct RetryingGateway {
    inner: Arc<dyn ModelGateway>,
    policy: RetryPolicy,
}

impl RetryingGateway {
    pub fn new(inner: Arc<dyn ModelGateway>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Invoke the gateway, retrying failed attempts up to the policy ceiling.
    ///
    /// The last error propagates unchanged.
    pub async fn invoke_with_retry(
        &self,
        prompt: &str,
        max_output_tokens: u32,
    ) -> LlmResult<String> {
        let attempts = self.policy.attempts();
        let mut attempt = 1;
        loop {
            match self.inner.invoke(prompt, max_output_tokens).await {
                Ok(text) => return Ok(text),
                Err(err) if attempt < attempts => {
                    warn!(
                        attempt,
                        max_attempts = attempts,
                        backoff_ms = self.policy.backoff_ms,
                        error = %err,
                        "model call failed, retrying"
                    );
                    tokio::time::sleep(self.policy.backoff()).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
