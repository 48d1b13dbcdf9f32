//! Generic tool adapter: one catalog entry turned into a directly callable
//! value for an agent loop.
//!
//! There is no per-tool code generation; a `BoundTool` interprets the
//! declarative schema at call time, which keeps the callable and the
//! schema from ever drifting apart.

use std::sync::Arc;

use serde_json::{Map, Value as J};

use crate::client::session::Session;
use crate::core::tool::ToolDefinition;

#[derive(Clone)]
pub struct BoundTool {
    session: Arc<Session>,
    definition: ToolDefinition,
}

impl BoundTool {
    pub fn new(session: Arc<Session>, definition: ToolDefinition) -> Self {
        Self {
            session,
            definition,
        }
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn description(&self) -> &str {
        &self.definition.description
    }

    pub fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    /// Invoke the remote tool. Null-valued and schema-unknown arguments are
    /// dropped before sending; `required` is NOT enforced here — that check
    /// lives with the server dispatcher so validation exists in exactly one
    /// place. Failures come back as text rather than errors: one broken
    /// tool must not abort a multi-step agent turn.
    pub async fn invoke(&self, arguments: Map<String, J>) -> String {
        let filtered = self.filter_arguments(arguments);
        tracing::debug!(tool = %self.definition.name, args = ?filtered, "invoking bound tool");
        match self
            .session
            .call_tool(&self.definition.name, J::Object(filtered))
            .await
        {
            Ok(text) => text,
            Err(e) => format!("Error executing {}: {e}", self.definition.name),
        }
    }

    fn filter_arguments(&self, arguments: Map<String, J>) -> Map<String, J> {
        let known = self.definition.property_names();
        arguments
            .into_iter()
            .filter(|(k, v)| !v.is_null() && known.contains(&k.as_str()))
            .collect()
    }
}

/// One callable per entry in the session's current catalog.
pub fn bind_catalog(session: &Arc<Session>) -> Vec<BoundTool> {
    session
        .catalog()
        .tools()
        .cloned()
        .map(|definition| BoundTool::new(session.clone(), definition))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn weather_def() -> ToolDefinition {
        serde_json::from_value(json!({
            "name": "get_weather",
            "description": "Get current weather for a location",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "location": { "type": "string" },
                    "units": { "type": "string" }
                },
                "required": ["location"]
            }
        }))
        .unwrap()
    }

    fn args(pairs: &[(&str, J)]) -> Map<String, J> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn null_and_unknown_arguments_are_dropped() {
        let session = Arc::new(Session::connect("http://127.0.0.1:9"));
        let tool = BoundTool::new(session, weather_def());
        let filtered = tool.filter_arguments(args(&[
            ("location", json!("London")),
            ("units", J::Null),
            ("verbose", json!(true)),
        ]));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered["location"], "London");
    }

    #[tokio::test]
    async fn failures_become_text_instead_of_raising() {
        // Session was never initialized, so the call fails; the adapter
        // must swallow that into a description.
        let session = Arc::new(Session::connect("http://127.0.0.1:9"));
        let tool = BoundTool::new(session, weather_def());
        let out = tool.invoke(args(&[("location", json!("London"))])).await;
        assert!(out.starts_with("Error executing get_weather:"));
        assert!(out.contains("not initialized"));
    }

    #[test]
    fn binding_an_empty_catalog_yields_no_tools() {
        let session = Arc::new(Session::connect("http://127.0.0.1:9"));
        assert!(bind_catalog(&session).is_empty());
    }
}
