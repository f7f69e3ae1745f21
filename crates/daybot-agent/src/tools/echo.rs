//! Echo tool — returns the text it was given.
//!
//! Mostly useful for wiring checks and demos; it is the simplest possible
//! tool the loop can exercise end to end.

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::base::{require_string, Tool};

/// Repeats the provided text back.
pub struct EchoTool;

#[async_trait]
impl Tool for EchoTool {
    fn name(&self) -> &str {
        "echo"
    }

    fn description(&self) -> &str {
        "Repeats a piece of text back to you.\n\
         Args:\n\
         - text (string, required): the text to repeat"
    }

    async fn execute(&self, args: Map<String, Value>) -> anyhow::Result<String> {
        require_string(&args, "text")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_echo_returns_text() {
        let args = json!({"text": "hi"}).as_object().unwrap().clone();
        assert_eq!(EchoTool.execute(args).await.unwrap(), "hi");
    }

    #[tokio::test]
    async fn test_echo_missing_text_errors() {
        assert!(EchoTool.execute(Map::new()).await.is_err());
    }
}
