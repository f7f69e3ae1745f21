//! Tool trait — the abstract interface every agent tool must implement.

use async_trait::async_trait;
use serde_json::{Map, Value};

// ─────────────────────────────────────────────
// Tool trait
// ─────────────────────────────────────────────

/// Every agent tool implements this trait.
///
/// The loop resolves tools by `name()` (case-insensitively), the prompt
/// builder puts `description()` into the system prompt's catalog verbatim,
/// and dispatch goes through `execute()`.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name the model uses to call this tool (e.g. `"add_event"`).
    fn name(&self) -> &str;

    /// Usage documentation shown to the model, verbatim.
    ///
    /// Spell out the arguments here — the catalog is prose, there is no
    /// machine-readable parameter schema on the wire.
    fn description(&self) -> &str;

    /// Execute the tool with the given named arguments.
    ///
    /// Returns the tool output as a string (the model reads this). On
    /// failure, return an `Err` — the dispatcher converts it to an error
    /// string so the model can react in the next round instead of the loop
    /// crashing.
    async fn execute(&self, args: Map<String, Value>) -> anyhow::Result<String>;
}

// ─────────────────────────────────────────────
// Arg helpers
// ─────────────────────────────────────────────

/// Extract a required `String` arg, returning a model-friendly error.
pub fn require_string(args: &Map<String, Value>, key: &str) -> anyhow::Result<String> {
    args.get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| anyhow::anyhow!("Missing required argument: {key}"))
}

/// Extract an optional `String` arg.
pub fn optional_string(args: &Map<String, Value>, key: &str) -> Option<String> {
    args.get(key).and_then(|v| v.as_str()).map(|s| s.to_string())
}

/// Extract an optional integer arg.
pub fn optional_i64(args: &Map<String, Value>, key: &str) -> Option<i64> {
    args.get(key).and_then(|v| v.as_i64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args_from(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_require_string_present() {
        let args = args_from(json!({"title": "buy milk"}));
        assert_eq!(require_string(&args, "title").unwrap(), "buy milk");
    }

    #[test]
    fn test_require_string_missing() {
        let args = Map::new();
        let err = require_string(&args, "title").unwrap_err();
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn test_require_string_wrong_type() {
        let args = args_from(json!({"title": 42}));
        assert!(require_string(&args, "title").is_err());
    }

    #[test]
    fn test_optional_string() {
        let args = args_from(json!({"notes": "2%"}));
        assert_eq!(optional_string(&args, "notes"), Some("2%".into()));
        assert_eq!(optional_string(&args, "other"), None);
    }

    #[test]
    fn test_optional_i64() {
        let args = args_from(json!({"limit": 5}));
        assert_eq!(optional_i64(&args, "limit"), Some(5));
        assert_eq!(optional_i64(&args, "missing"), None);
    }
}
