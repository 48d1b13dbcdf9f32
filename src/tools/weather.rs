use async_trait::async_trait;
use serde_json::json;

use crate::clients::weatherstack::WeatherstackClient;
use crate::domain::{Tool, ToolError, WeatherReport};

/// Current-conditions lookup backed by the upstream weather API. Upstream
/// trouble (bad key, unknown city, network) is reported as ordinary text so
/// a broken weather feed never turns into a protocol error.
pub struct WeatherTool {
    client: Option<WeatherstackClient>,
}

impl WeatherTool {
    pub fn new(client: Option<WeatherstackClient>) -> Self {
        Self { client }
    }
}

fn render_report(report: &WeatherReport) -> String {
    let place = if report.country.is_empty() {
        report.city.clone()
    } else {
        format!("{}, {}", report.city, report.country)
    };
    format!(
        "Weather in {place}: {condition}, {temp}°C (feels like {feels}°C). \
         Wind {wind} km/h {dir}, humidity {humidity}%.",
        condition = report.condition,
        temp = report.temperature_c,
        feels = report.feels_like_c,
        wind = report.wind_speed_kmh,
        dir = report.wind_direction,
        humidity = report.humidity,
    )
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &'static str {
        "get_weather"
    }
    fn description(&self) -> &'static str {
        "Get current weather information for a specified city or location"
    }
    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "location": {
                    "type": "string",
                    "description": "The city, state, or location to get weather for"
                }
            },
            "required": ["location"]
        })
    }
    async fn call(&self, arguments: &serde_json::Value) -> Result<serde_json::Value, ToolError> {
        let location = arguments
            .get("location")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ToolError::Message("missing required argument: location".into()))?;

        let Some(client) = &self.client else {
            return Ok(json!(
                "Weatherstack API key not configured. Set WEATHERSTACK_API_KEY to enable get_weather."
            ));
        };

        tracing::debug!(location, "get_weather lookup");
        match client.current(location).await {
            Ok(report) => Ok(json!(render_report(&report))),
            Err(e) => Ok(json!(format!(
                "Unable to fetch weather for {location}: {e}"
            ))),
        }
    }
}
