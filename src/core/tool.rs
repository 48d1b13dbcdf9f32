//! Tool schema types learned over the wire.

use serde::{Deserialize, Serialize};
use serde_json::Value as J;

/// A tool advertised by a server: a name, a human description, and a JSON
/// schema describing the argument object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "inputSchema", default = "object_schema")]
    pub input_schema: J,
}

fn object_schema() -> J {
    serde_json::json!({ "type": "object" })
}

impl ToolDefinition {
    /// Argument names the schema declares. Anything else is noise a caller
    /// should not forward.
    pub fn property_names(&self) -> Vec<&str> {
        self.input_schema
            .get("properties")
            .and_then(J::as_object)
            .map(|props| props.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn required(&self) -> Vec<&str> {
        self.input_schema
            .get("required")
            .and_then(J::as_array)
            .map(|req| req.iter().filter_map(J::as_str).collect())
            .unwrap_or_default()
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required().contains(&name)
    }

    pub fn missing_required<'a>(&'a self, args: &J) -> Option<&'a str> {
        missing_required(&self.input_schema, args)
    }
}

/// First `required` entry of `schema` absent (or null) in `args`, if any.
pub fn missing_required<'a>(schema: &'a J, args: &J) -> Option<&'a str> {
    let required = schema.get("required")?.as_array()?;
    required
        .iter()
        .filter_map(J::as_str)
        .find(|p| args.get(*p).map_or(true, J::is_null))
}

/// Payload of a `tools/list` result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListToolsResult {
    pub tools: Vec<ToolDefinition>,
    #[serde(default)]
    pub cursor: Option<J>,
}
