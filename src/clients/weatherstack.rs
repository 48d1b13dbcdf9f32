use std::time::Instant;

use reqwest::Client;
use serde::Deserialize;

use crate::domain::WeatherReport;
use crate::infra::http::headers::{add_standard_headers, generate_request_id};
use crate::infra::runtime::limits::{make_http_client, retry_async};

/// Upstream weather API client (Weatherstack-compatible `GET /current`).
#[derive(Clone)]
pub struct WeatherstackClient {
    base: String,
    access_key: String,
    http: Client,
    retries: u32,
}

impl WeatherstackClient {
    pub fn new(base: impl Into<String>, access_key: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            access_key: access_key.into(),
            http: make_http_client(),
            retries: 2,
        }
    }

    pub async fn current(&self, query: &str) -> Result<WeatherReport, String> {
        let url = format!("{}/current", self.base.trim_end_matches('/'));
        tracing::debug!(endpoint = %url, query, "weatherstack.current request");
        let req_id = generate_request_id();
        let start = Instant::now();
        let res: Result<CurrentWire, String> = retry_async(self.retries, move |_| {
            let http = self.http.clone();
            let url = url.clone();
            let req_id = req_id.clone();
            let key = self.access_key.clone();
            let query = query.to_owned();
            async move {
                let (builder, _rid) = add_standard_headers(http.get(url), Some(req_id));
                let resp = builder
                    .query(&[
                        ("access_key", key.as_str()),
                        ("query", query.as_str()),
                        ("units", "m"),
                    ])
                    .send()
                    .await
                    .map_err(|e| e.to_string())?;
                if !resp.status().is_success() {
                    if resp.status().is_server_error() {
                        return Err(format!("retryable status {}", resp.status()));
                    }
                    return Err(format!("upstream status {}", resp.status()));
                }
                resp.json::<CurrentWire>().await.map_err(|e| e.to_string())
            }
        })
        .await;
        if res.is_err() {
            metrics::counter!("weather_upstream_errors_total").increment(1);
        }
        let wire = res?;
        let elapsed_ms = start.elapsed().as_millis() as f64;
        metrics::histogram!("weather_upstream_latency_ms").record(elapsed_ms);

        // The API reports failures inside a 200 body.
        if let Some(err) = wire.error {
            return Err(format!("weather api error {}: {}", err.code, err.info));
        }
        let current = wire
            .current
            .ok_or_else(|| format!("no weather data found for {query}"))?;
        let location = wire.location.unwrap_or_default();
        Ok(WeatherReport {
            city: location.name.unwrap_or_else(|| query.to_owned()),
            country: location.country.unwrap_or_default(),
            temperature_c: current.temperature,
            feels_like_c: current.feelslike,
            condition: current
                .weather_descriptions
                .into_iter()
                .next()
                .unwrap_or_else(|| "Unknown".into()),
            humidity: current.humidity,
            wind_speed_kmh: current.wind_speed,
            wind_direction: current.wind_dir,
        })
    }
}

#[derive(Deserialize)]
struct CurrentWire {
    error: Option<ApiErrorWire>,
    location: Option<LocationWire>,
    current: Option<ConditionsWire>,
}

#[derive(Deserialize)]
struct ApiErrorWire {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    info: String,
}

#[derive(Deserialize, Default)]
struct LocationWire {
    name: Option<String>,
    country: Option<String>,
}

#[derive(Deserialize)]
struct ConditionsWire {
    #[serde(default)]
    temperature: f64,
    #[serde(default)]
    feelslike: f64,
    #[serde(default)]
    weather_descriptions: Vec<String>,
    #[serde(default)]
    humidity: i64,
    #[serde(default)]
    wind_speed: f64,
    #[serde(default)]
    wind_dir: String,
}
