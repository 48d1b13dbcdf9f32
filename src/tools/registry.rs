use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{json, Value as J};

use crate::clients::weatherstack::WeatherstackClient;
use crate::domain::Tool;
use crate::infra::config::Config;
use crate::tools::clock::ClockTool;
use crate::tools::greeting::GreetingTool;
use crate::tools::weather::WeatherTool;

/// Tool catalog on the server side. Assembled once at startup, read-only
/// afterwards, and passed explicitly into the dispatcher so independent
/// server instances never share state. Iteration order is stable.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    by_name: Arc<BTreeMap<&'static str, Arc<dyn Tool>>>,
}

impl ToolRegistry {
    pub fn with_tools(tools: impl IntoIterator<Item = Arc<dyn Tool>>) -> Self {
        let mut map: BTreeMap<&'static str, Arc<dyn Tool>> = BTreeMap::new();
        for t in tools {
            map.insert(t.name(), t);
        }
        Self {
            by_name: Arc::new(map),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.by_name.get(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// The `tools/list` payload: one entry per tool, wire casing.
    pub fn advertise(&self) -> Vec<J> {
        self.by_name
            .values()
            .map(|t| {
                json!({
                    "name": t.name(),
                    "description": t.description(),
                    "inputSchema": t.input_schema(),
                })
            })
            .collect()
    }
}

/// Standard tool set for the shipped server binary. The weather tool is
/// always advertised; without an API key it answers with a configuration
/// notice instead of dropping off the catalog.
pub fn build_registry(cfg: &Config) -> ToolRegistry {
    let weather_client = cfg
        .weather_api_key
        .as_ref()
        .map(|key| WeatherstackClient::new(cfg.weather_base_url.clone(), key.clone()));

    ToolRegistry::with_tools([
        Arc::new(GreetingTool) as Arc<dyn Tool>,
        Arc::new(ClockTool) as Arc<dyn Tool>,
        Arc::new(WeatherTool::new(weather_client)) as Arc<dyn Tool>,
    ])
}
