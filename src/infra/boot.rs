use std::net::SocketAddr;

use crate::core::rpc::ServerInfo;
use crate::infra::config::Config;

pub async fn run_server() -> anyhow::Result<()> {
    let cfg = Config::from_env();
    tracing::info!(
        port = cfg.port,
        server = %cfg.server_name,
        weather_configured = cfg.weather_api_key.is_some(),
        "BOOT mcp-bridge"
    );

    let registry = crate::tools::registry::build_registry(&cfg);
    let server = ServerInfo {
        name: cfg.server_name.clone(),
        version: env!("CARGO_PKG_VERSION").into(),
    };
    let app = crate::infra::http_app::build_app(registry, server);

    let addr: SocketAddr = ([0, 0, 0, 0], cfg.port).into();
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;
    Ok(())
}
