use async_trait::async_trait;
use chrono::Local;
use serde_json::json;

use crate::domain::{Tool, ToolError};

#[derive(Clone, Default)]
pub struct ClockTool;

#[async_trait]
impl Tool for ClockTool {
    fn name(&self) -> &'static str {
        "get_time"
    }
    fn description(&self) -> &'static str {
        "Get the current server date and time"
    }
    fn input_schema(&self) -> serde_json::Value {
        json!({ "type": "object", "properties": {} })
    }
    async fn call(&self, _arguments: &serde_json::Value) -> Result<serde_json::Value, ToolError> {
        let now = Local::now().format("%Y-%m-%d %H:%M:%S");
        Ok(json!(format!("Current time: {now}")))
    }
}
