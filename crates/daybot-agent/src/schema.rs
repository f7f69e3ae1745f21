//! The reply contract — what a model turn must look like, and the parser
//! that enforces it.
//!
//! The system prompt mandates a JSON object with exactly two keys:
//! `tool_calls` (a list of `{name, args}` objects) and `content` (a string).
//! That instruction is advisory prose as far as the model is concerned, so
//! the parser validates independently and fails closed on anything else —
//! missing keys, extra keys, wrong types, non-JSON text, trailing prose.
//! A parse failure is recoverable: the loop re-prompts on it.

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

// ─────────────────────────────────────────────
// ToolCall
// ─────────────────────────────────────────────

/// One tool invocation requested by the model.
///
/// `args` is a `serde_json::Map`, which keeps its keys sorted — serializing
/// the same argument set always yields the same string, which is what makes
/// [`ToolCall::invocation_key`] a usable identity.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ToolCall {
    /// Tool name; matched case-insensitively against the registry.
    pub name: String,
    /// Named arguments (may be empty).
    pub args: Map<String, Value>,
}

impl ToolCall {
    /// Canonical identity of this call within one turn.
    ///
    /// Two calls with the same (case-folded) name and the same arguments get
    /// the same key; the loop uses this to execute each distinct call at
    /// most once per turn.
    pub fn invocation_key(&self) -> String {
        let args = serde_json::to_string(&self.args).unwrap_or_default();
        format!("{}|{}", self.name.to_lowercase(), args)
    }
}

// ─────────────────────────────────────────────
// AgentResponse
// ─────────────────────────────────────────────

/// A parsed model turn: zero or more tool calls plus a free-text reply.
///
/// A well-formed turn has a non-empty tool-call list or non-empty content,
/// but the loop tolerates violations — an all-empty response is treated as
/// a (blank) final answer.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AgentResponse {
    /// Tools the model wants run, in the order it listed them.
    pub tool_calls: Vec<ToolCall>,
    /// Reply text shown to the user when no tool needs to be invoked.
    pub content: String,
}

impl AgentResponse {
    /// Plain-text final answer with no tool calls.
    pub fn text(content: impl Into<String>) -> Self {
        AgentResponse {
            tool_calls: Vec::new(),
            content: content.into(),
        }
    }

    /// The synthetic answer returned when the model asked for a tool that
    /// isn't registered.
    pub fn tool_not_found(name: &str) -> Self {
        AgentResponse::text(format!("Tool {name} not found."))
    }
}

// ─────────────────────────────────────────────
// Parser
// ─────────────────────────────────────────────

/// Why a model turn failed to parse.
#[derive(Debug, Error)]
#[error("malformed model reply: {0}")]
pub struct ParseError(#[from] serde_json::Error);

/// Parse raw model output into an [`AgentResponse`].
///
/// Leading/trailing whitespace is tolerated; everything else must be one
/// JSON object satisfying the contract.
pub fn parse_agent_response(raw: &str) -> Result<AgentResponse, ParseError> {
    Ok(serde_json::from_str(raw.trim())?)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_reply() {
        let resp = parse_agent_response(r#"{"tool_calls": [], "content": "Hello!"}"#).unwrap();
        assert!(resp.tool_calls.is_empty());
        assert_eq!(resp.content, "Hello!");
    }

    #[test]
    fn test_parse_tool_call() {
        let raw = r#"{"tool_calls": [{"name": "echo", "args": {"text": "hi"}}], "content": ""}"#;
        let resp = parse_agent_response(raw).unwrap();
        assert_eq!(resp.tool_calls.len(), 1);
        assert_eq!(resp.tool_calls[0].name, "echo");
        assert_eq!(resp.tool_calls[0].args["text"], "hi");
        assert!(resp.content.is_empty());
    }

    #[test]
    fn test_parse_multiple_calls_keep_order() {
        let raw = r#"{"tool_calls": [
            {"name": "clock", "args": {}},
            {"name": "list_events", "args": {"limit": 5}}
        ], "content": ""}"#;
        let resp = parse_agent_response(raw).unwrap();
        let names: Vec<&str> = resp.tool_calls.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["clock", "list_events"]);
    }

    #[test]
    fn test_parse_tolerates_surrounding_whitespace() {
        let resp =
            parse_agent_response("\n  {\"tool_calls\": [], \"content\": \"ok\"}  \n").unwrap();
        assert_eq!(resp.content, "ok");
    }

    #[test]
    fn test_parse_rejects_non_json() {
        assert!(parse_agent_response("not json").is_err());
    }

    #[test]
    fn test_parse_rejects_trailing_prose() {
        let raw = r#"{"tool_calls": [], "content": "ok"} — hope that helps!"#;
        assert!(parse_agent_response(raw).is_err());
    }

    #[test]
    fn test_parse_rejects_code_fence() {
        let raw = "```json\n{\"tool_calls\": [], \"content\": \"ok\"}\n```";
        assert!(parse_agent_response(raw).is_err());
    }

    #[test]
    fn test_parse_rejects_missing_keys() {
        assert!(parse_agent_response(r#"{"content": "ok"}"#).is_err());
        assert!(parse_agent_response(r#"{"tool_calls": []}"#).is_err());
        assert!(parse_agent_response("{}").is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        let raw = r#"{"tool_calls": [], "content": "ok", "mood": "helpful"}"#;
        assert!(parse_agent_response(raw).is_err());
    }

    #[test]
    fn test_parse_rejects_wrong_types() {
        assert!(parse_agent_response(r#"{"tool_calls": "none", "content": "ok"}"#).is_err());
        assert!(parse_agent_response(r#"{"tool_calls": [], "content": 42}"#).is_err());
        assert!(
            parse_agent_response(r#"{"tool_calls": [{"name": 1, "args": {}}], "content": ""}"#)
                .is_err()
        );
        assert!(parse_agent_response(
            r#"{"tool_calls": [{"name": "echo", "args": ["hi"]}], "content": ""}"#
        )
        .is_err());
    }

    #[test]
    fn test_parse_rejects_extra_call_fields() {
        let raw = r#"{"tool_calls": [{"name": "echo", "args": {}, "id": 7}], "content": ""}"#;
        assert!(parse_agent_response(raw).is_err());
    }

    #[test]
    fn test_parse_accepts_empty_response() {
        // All-empty is tolerated; whether to render it blank is the caller's
        // decision.
        let resp = parse_agent_response(r#"{"tool_calls": [], "content": ""}"#).unwrap();
        assert_eq!(resp, AgentResponse::default());
    }

    #[test]
    fn test_invocation_key_case_insensitive_name() {
        let a: ToolCall =
            serde_json::from_str(r#"{"name": "Echo", "args": {"text": "hi"}}"#).unwrap();
        let b: ToolCall =
            serde_json::from_str(r#"{"name": "echo", "args": {"text": "hi"}}"#).unwrap();
        assert_eq!(a.invocation_key(), b.invocation_key());
    }

    #[test]
    fn test_invocation_key_ignores_arg_order() {
        let a: ToolCall =
            serde_json::from_str(r#"{"name": "add_event", "args": {"summary": "standup", "start": "2026-08-05T09:00:00"}}"#)
                .unwrap();
        let b: ToolCall =
            serde_json::from_str(r#"{"name": "add_event", "args": {"start": "2026-08-05T09:00:00", "summary": "standup"}}"#)
                .unwrap();
        assert_eq!(a.invocation_key(), b.invocation_key());
    }

    #[test]
    fn test_invocation_key_distinguishes_args() {
        let a: ToolCall =
            serde_json::from_str(r#"{"name": "echo", "args": {"text": "hi"}}"#).unwrap();
        let b: ToolCall =
            serde_json::from_str(r#"{"name": "echo", "args": {"text": "bye"}}"#).unwrap();
        assert_ne!(a.invocation_key(), b.invocation_key());
    }

    #[test]
    fn test_tool_not_found_shape() {
        let resp = AgentResponse::tool_not_found("missing_tool");
        assert_eq!(resp.content, "Tool missing_tool not found.");
        assert!(resp.tool_calls.is_empty());
    }
}
