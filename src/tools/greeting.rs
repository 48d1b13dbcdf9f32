use async_trait::async_trait;
use serde_json::json;

use crate::domain::{Tool, ToolError};

#[derive(Clone, Default)]
pub struct GreetingTool;

#[async_trait]
impl Tool for GreetingTool {
    fn name(&self) -> &'static str {
        "get_greeting"
    }
    fn description(&self) -> &'static str {
        "Get a personalized greeting message"
    }
    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "name": { "type": "string", "description": "Name of the person to greet" }
            },
            "required": ["name"]
        })
    }
    async fn call(&self, arguments: &serde_json::Value) -> Result<serde_json::Value, ToolError> {
        let name = arguments
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or("User");
        Ok(json!(format!("Hello, {name}! Welcome to the MCP server.")))
    }
}
