//! Agent loop — the model ↔ tool-dispatch cycle.
//!
//! One user turn runs prompt → parse → dispatch rounds until the model
//! answers without tool calls or the depth budget runs out. Model errors and
//! contract violations are retried out of the same budget; tool results are
//! fed back as hidden `Thought:` messages so the next round can build on
//! them.

use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use daybot_core::transcript::Transcript;
use daybot_core::types::Message;
use daybot_core::utils::truncate_string;
use daybot_providers::{ChatClient, RequestOptions};

use crate::schema::{parse_agent_response, AgentResponse};
use crate::tools::ToolRegistry;

/// Default maximum model calls per user turn.
const DEFAULT_MAX_DEPTH: usize = 4;

// ─────────────────────────────────────────────
// Turn failure
// ─────────────────────────────────────────────

/// Ways a turn can fail outright.
///
/// Everything else — contract violations, model errors, unknown tools,
/// repeated calls — is resolved inside the turn; only these escape to the
/// caller, which must surface them instead of silently retrying.
#[derive(Debug, Error)]
pub enum TurnError {
    /// The depth budget ran out before the model produced a final answer.
    #[error("agent is failing too much ({attempts} model calls without a final answer)")]
    FailingTooMuch { attempts: usize },

    /// The turn was cancelled from outside.
    #[error("turn cancelled")]
    Cancelled,
}

// ─────────────────────────────────────────────
// Per-turn state
// ─────────────────────────────────────────────

/// Bookkeeping for one turn, passed down the prompt/dispatch cycle.
///
/// Discarded when the turn ends; nothing here outlives it.
struct TurnState {
    /// Model calls made so far.
    attempts: usize,
    /// Maximum model calls allowed.
    max_depth: usize,
    /// Invocation keys of tool calls already executed this turn.
    invoked: HashSet<String>,
}

impl TurnState {
    fn new(max_depth: usize) -> Self {
        TurnState {
            attempts: 0,
            max_depth,
            invoked: HashSet::new(),
        }
    }

    /// Take one unit of depth budget. Returns `false` when exhausted.
    fn consume(&mut self) -> bool {
        if self.attempts >= self.max_depth {
            return false;
        }
        self.attempts += 1;
        true
    }
}

// ─────────────────────────────────────────────
// AgentLoop
// ─────────────────────────────────────────────

/// The agent loop: prompts the model, enforces the reply contract, and
/// dispatches tool calls.
///
/// The chat client is an injected dependency with an explicit lifetime —
/// construct one, hand it in, drop both together.
pub struct AgentLoop {
    /// Model client.
    client: Arc<dyn ChatClient>,
    /// Registered tools.
    tools: ToolRegistry,
    /// Model to use.
    model: String,
    /// Max model calls per turn.
    max_depth: usize,
    /// Generation options (max_tokens, temperature).
    options: RequestOptions,
}

impl AgentLoop {
    /// Create a new agent loop.
    ///
    /// `model` defaults to the client's default; `max_depth` defaults to
    /// [`DEFAULT_MAX_DEPTH`].
    pub fn new(
        client: Arc<dyn ChatClient>,
        tools: ToolRegistry,
        model: Option<String>,
        max_depth: Option<usize>,
        options: Option<RequestOptions>,
    ) -> Self {
        let model = model.unwrap_or_else(|| client.default_model().to_string());
        let max_depth = max_depth.unwrap_or(DEFAULT_MAX_DEPTH);
        let options = options.unwrap_or_default();

        info!(
            model = %model,
            tools = tools.len(),
            max_depth = max_depth,
            "agent loop initialized"
        );

        Self {
            client,
            tools,
            model,
            max_depth,
            options,
        }
    }

    /// Run one user turn to completion.
    ///
    /// Expects the user's message to already be appended to `transcript`;
    /// appends a `Thought:` entry per executed tool and returns the model's
    /// final structured reply. The cancellation token is checked before
    /// every model call and every tool execution.
    pub async fn run_turn(
        &self,
        transcript: &mut Transcript,
        cancel: &CancellationToken,
    ) -> Result<AgentResponse, TurnError> {
        let mut turn = TurnState::new(self.max_depth);

        loop {
            if cancel.is_cancelled() {
                return Err(TurnError::Cancelled);
            }
            if !turn.consume() {
                return Err(TurnError::FailingTooMuch {
                    attempts: turn.attempts,
                });
            }

            debug!(attempt = turn.attempts, "model call");
            let raw = match self
                .client
                .complete(transcript.all(), &self.model, &self.options)
                .await
            {
                Ok(raw) => raw,
                Err(e) => {
                    warn!(attempt = turn.attempts, error = %e, "model call failed, re-prompting");
                    continue;
                }
            };

            let response = match parse_agent_response(&raw) {
                Ok(r) => r,
                Err(e) => {
                    warn!(attempt = turn.attempts, error = %e, "reply violated the contract, re-prompting");
                    continue;
                }
            };

            if response.tool_calls.is_empty() {
                // Final answer — hand it back untouched.
                return Ok(response);
            }

            for call in &response.tool_calls {
                let key = call.invocation_key();
                if turn.invoked.contains(&key) {
                    // The model is repeating itself: it believes the work is
                    // done. Stop dispatching and return what we have.
                    info!(tool = %call.name, "repeated tool call, ending turn");
                    return Ok(response);
                }

                if cancel.is_cancelled() {
                    return Err(TurnError::Cancelled);
                }

                let name = call.name.to_lowercase();
                let Some(tool) = self.tools.resolve(&name) else {
                    warn!(tool = %name, "unknown tool requested");
                    return Ok(AgentResponse::tool_not_found(&name));
                };

                info!(tool = %name, attempt = turn.attempts, "executing tool call");
                let output = match tool.execute(call.args.clone()).await {
                    Ok(result) => result,
                    Err(e) => {
                        warn!(tool = %name, error = %e, "tool execution failed");
                        format!("Error executing {name}: {e}")
                    }
                };
                debug!(tool = %name, output = %truncate_string(&output, 120), "tool result");

                let args_json = serde_json::to_string(&call.args).unwrap_or_default();
                transcript.append(Message::thought(format!(
                    "Thought: - I called {name} with args {args_json} and got back: {output}."
                )));
                turn.invoked.insert(key);
            }
            // Whole batch dispatched — re-prompt with the new thoughts in
            // context.
        }
    }

    /// Process one user message: append it, run the turn, append the reply.
    ///
    /// Convenience for callers that don't manage cancellation themselves.
    pub async fn process(
        &self,
        transcript: &mut Transcript,
        user_text: &str,
    ) -> Result<String, TurnError> {
        transcript.append(Message::user(user_text));

        let cancel = CancellationToken::new();
        let response = self.run_turn(transcript, &cancel).await?;

        transcript.append(Message::assistant(response.content.clone()));
        Ok(response.content)
    }

    /// Get a reference to the tool registry.
    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Get the model name.
    pub fn model(&self) -> &str {
        &self.model
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
