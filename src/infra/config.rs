const DEFAULT_WEATHER_BASE: &str = "http://api.weatherstack.com";

pub struct Config {
    pub port: u16,
    pub server_name: String,
    pub weather_base_url: String,
    pub weather_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(8080);
        let server_name =
            std::env::var("SERVER_NAME").unwrap_or_else(|_| env!("CARGO_PKG_NAME").into());
        let weather_base_url = std::env::var("WEATHERSTACK_BASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_WEATHER_BASE.into());
        let weather_api_key = std::env::var("WEATHERSTACK_API_KEY")
            .ok()
            .filter(|s| !s.trim().is_empty());

        Self {
            port,
            server_name,
            weather_base_url,
            weather_api_key,
        }
    }
}
