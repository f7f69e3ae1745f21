//! Clock tool — tells the model what time it is.
//!
//! The day-planner tools all reason about "today" and "tomorrow"; this is
//! how the model anchors those words to actual dates.

use async_trait::async_trait;
use chrono::Local;
use serde_json::{Map, Value};

use super::base::Tool;

/// Reports the current local date and time.
pub struct ClockTool;

#[async_trait]
impl Tool for ClockTool {
    fn name(&self) -> &str {
        "clock"
    }

    fn description(&self) -> &str {
        "Returns the current local date, time, and weekday.\n\
         Args: none"
    }

    async fn execute(&self, _args: Map<String, Value>) -> anyhow::Result<String> {
        let now = Local::now();
        Ok(now.format("%A, %Y-%m-%d %H:%M:%S %Z").to_string())
    }
}
