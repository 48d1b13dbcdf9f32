use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("{0}")]
    Message(String),
}

/// Current conditions for one place, as mapped from the upstream weather API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub city: String,
    pub country: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub condition: String,
    pub humidity: i64,
    pub wind_speed_kmh: f64,
    pub wind_direction: String,
}

/// The boundary the dispatcher executes against: a named capability taking a
/// JSON argument object. Implementations report domain failures (an upstream
/// API being down, a bad city name) as ordinary `Ok` text describing the
/// problem; `Err` is reserved for genuine execution faults and is wrapped as
/// an internal error by the dispatcher.
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn input_schema(&self) -> serde_json::Value;
    async fn call(&self, arguments: &serde_json::Value) -> Result<serde_json::Value, ToolError>;
}
