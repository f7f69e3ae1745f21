//! Chat client trait — the model boundary of the agent loop.
//!
//! The loop sends the full ordered conversation and expects back a single
//! text blob for the turn. Everything about *how* the text is produced
//! (endpoint, sampling, token limits) lives behind this trait.

use async_trait::async_trait;
use thiserror::Error;

use daybot_core::types::Message;

// ─────────────────────────────────────────────
// Request options
// ─────────────────────────────────────────────

/// Generation options passed to each model call.
#[derive(Clone, Debug)]
pub struct RequestOptions {
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature (0.0 – 2.0).
    pub temperature: f64,
    /// Greedy decoding: when set, temperature 0.0 is sent regardless of the
    /// `temperature` field.
    pub deterministic: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            max_tokens: 1024,
            temperature: 0.4,
            deterministic: false,
        }
    }
}

impl RequestOptions {
    /// The temperature actually sent on the wire.
    pub fn effective_temperature(&self) -> f64 {
        if self.deterministic {
            0.0
        } else {
            self.temperature
        }
    }
}

// ─────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────

/// Failure modes of a model call.
///
/// The agent loop treats every variant as retryable within its depth budget.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The request never completed (connect, DNS, timeout, ...).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    /// The body came back 2xx but was not a usable completion.
    #[error("malformed completion response: {0}")]
    MalformedResponse(String),
}

// ─────────────────────────────────────────────
// ChatClient trait
// ─────────────────────────────────────────────

/// A chat-completion capability.
///
/// Implementations must be cheap to share (`Arc<dyn ChatClient>`); the loop
/// holds one for its whole lifetime.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send the conversation and return the model's raw text for the turn.
    ///
    /// Thought messages are part of the model-visible context and must be
    /// included (implementations put them on the wire with the assistant
    /// role).
    async fn complete(
        &self,
        messages: &[Message],
        model: &str,
        options: &RequestOptions,
    ) -> Result<String, ChatError>;

    /// The default model for this client instance.
    fn default_model(&self) -> &str;

    /// Display name for logging.
    fn display_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_temperature() {
        let opts = RequestOptions {
            temperature: 0.9,
            deterministic: false,
            ..Default::default()
        };
        assert_eq!(opts.effective_temperature(), 0.9);

        let greedy = RequestOptions {
            temperature: 0.9,
            deterministic: true,
            ..Default::default()
        };
        assert_eq!(greedy.effective_temperature(), 0.0);
    }
}
