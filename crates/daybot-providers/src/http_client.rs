//! Generic HTTP client for OpenAI-compatible chat-completion APIs.
//!
//! Talks to any `/chat/completions` endpoint (OpenAI, OpenRouter, DeepSeek,
//! Groq, vLLM, ...). The tool-calling contract of this project is JSON text
//! mandated by the system prompt, so the request carries no native `tools`
//! field — the model's answer is read back as one text blob.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use daybot_core::types::{Message, Role};

use crate::traits::{ChatClient, ChatError, RequestOptions};

// ─────────────────────────────────────────────
// Wire format
// ─────────────────────────────────────────────

/// One message as sent on the wire.
///
/// Thought entries go out with the assistant role: they are the model's own
/// prior reasoning, and the role split is a rendering concern the API never
/// sees.
#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

fn wire_role(role: Role) -> &'static str {
    match role {
        Role::System => "system",
        Role::User => "user",
        Role::Assistant | Role::Thought => "assistant",
    }
}

/// Request body for a chat completion call.
#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    max_tokens: u32,
    temperature: f64,
}

/// Response body of a chat completion call.
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

// ─────────────────────────────────────────────
// HttpChatClient
// ─────────────────────────────────────────────

/// A chat client that talks to an OpenAI-compatible HTTP API.
pub struct HttpChatClient {
    /// HTTP client (shared, connection-pooled).
    client: reqwest::Client,
    /// API base URL (e.g. `"https://api.openai.com/v1"`).
    api_base: String,
    /// API key for Bearer authentication.
    api_key: String,
    /// Default model for this client instance.
    default_model: String,
}

impl std::fmt::Debug for HttpChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpChatClient")
            .field("api_base", &self.api_base)
            .field("default_model", &self.default_model)
            .finish()
    }
}

impl HttpChatClient {
    /// Create a new client.
    pub fn new(
        api_base: impl Into<String>,
        api_key: impl Into<String>,
        default_model: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to build HTTP client");

        HttpChatClient {
            client,
            api_base: api_base.into(),
            api_key: api_key.into(),
            default_model: default_model.into(),
        }
    }

    /// Build the full chat completions URL.
    fn completions_url(&self) -> String {
        let base = self.api_base.trim_end_matches('/');
        format!("{}/chat/completions", base)
    }
}

#[async_trait]
impl ChatClient for HttpChatClient {
    async fn complete(
        &self,
        messages: &[Message],
        model: &str,
        options: &RequestOptions,
    ) -> Result<String, ChatError> {
        debug!(
            model = %model,
            messages = messages.len(),
            "calling chat completion endpoint"
        );

        let request_body = CompletionRequest {
            model,
            messages: messages
                .iter()
                .map(|m| WireMessage {
                    role: wire_role(m.role),
                    content: &m.content,
                })
                .collect(),
            max_tokens: options.max_tokens,
            temperature: options.effective_temperature(),
        };

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            error!(status = %status, body = %body, "API error");
            return Err(ChatError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| ChatError::MalformedResponse(e.to_string()))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ChatError::MalformedResponse("no choices in response".into()))?
            .message
            .content
            .unwrap_or_default();

        debug!(content_len = content.len(), "completion received");
        Ok(content)
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    fn display_name(&self) -> &str {
        "OpenAI-compatible HTTP"
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
