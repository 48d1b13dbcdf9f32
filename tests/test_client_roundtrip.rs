//! End-to-end tests: a real client session speaking to an in-process
//! server over a loopback socket.

use std::sync::Arc;

use serde_json::{json, Map, Value};

use mcp_bridge::client::{bind_catalog, Session};
use mcp_bridge::core::error::ClientError;
use mcp_bridge::core::rpc::{ServerInfo, PROTOCOL_VERSION};
use mcp_bridge::infra::config::Config;
use mcp_bridge::infra::http_app::build_app;
use mcp_bridge::tools::registry::build_registry;

async fn spawn_server(weather_base: &str) -> String {
    let cfg = Config {
        port: 0,
        server_name: "roundtrip-server".into(),
        weather_base_url: weather_base.into(),
        weather_api_key: Some("k123".into()),
    };
    let app = build_app(
        build_registry(&cfg),
        ServerInfo {
            name: cfg.server_name.clone(),
            version: "0.1.0".into(),
        },
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn london_mock(upstream: &httpmock::MockServer) {
    upstream.mock(|when, then| {
        when.method(httpmock::Method::GET)
            .path("/current")
            .query_param("query", "London");
        then.status(200).json_body(json!({
            "location": { "name": "London", "country": "United Kingdom" },
            "current": {
                "temperature": 18.0,
                "feelslike": 17.0,
                "weather_descriptions": ["Partly cloudy"],
                "humidity": 72,
                "wind_speed": 11.0,
                "wind_dir": "WSW"
            }
        }));
    });
}

#[tokio::test]
async fn initialize_list_and_call_weather() {
    let upstream = httpmock::MockServer::start();
    london_mock(&upstream);
    let base = spawn_server(&upstream.base_url()).await;

    let session = Session::connect(base.as_str());
    let init = session.initialize().await.unwrap();
    assert_eq!(init.protocol_version, PROTOCOL_VERSION);
    assert_eq!(init.server_info.name, "roundtrip-server");

    let tools = session.list_tools().await.unwrap();
    let weather = tools.iter().find(|t| t.name == "get_weather").unwrap();
    assert!(weather.is_required("location"));

    let text = session
        .call_tool("get_weather", json!({ "location": "London" }))
        .await
        .unwrap();
    assert!(text.contains("London"));
}

#[tokio::test]
async fn missing_required_argument_surfaces_invalid_params() {
    let upstream = httpmock::MockServer::start();
    let base = spawn_server(&upstream.base_url()).await;

    let session = Session::connect(base.as_str());
    session.initialize().await.unwrap();
    session.list_tools().await.unwrap();

    let err = session
        .call_tool("get_weather", json!({}))
        .await
        .unwrap_err();
    assert_eq!(err.protocol_code(), Some(-32602));
}

#[tokio::test]
async fn tools_absent_from_the_catalog_are_rejected_locally() {
    let upstream = httpmock::MockServer::start();
    let base = spawn_server(&upstream.base_url()).await;

    let session = Session::connect(base.as_str());
    session.initialize().await.unwrap();
    session.list_tools().await.unwrap();

    let err = session
        .call_tool("nonexistent_tool", json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::UnknownTool(_)));
}

#[tokio::test]
async fn repeated_initialize_reports_the_same_negotiated_version() {
    let upstream = httpmock::MockServer::start();
    let base = spawn_server(&upstream.base_url()).await;

    let session = Session::connect(base.as_str());
    let first = session.initialize().await.unwrap();
    let second = session.initialize().await.unwrap();
    assert_eq!(first.protocol_version, second.protocol_version);
    assert_eq!(
        session.protocol_version().as_deref(),
        Some(PROTOCOL_VERSION)
    );
}

#[tokio::test]
async fn consecutive_tool_listings_are_identical() {
    let upstream = httpmock::MockServer::start();
    let base = spawn_server(&upstream.base_url()).await;

    let session = Session::connect(base.as_str());
    session.initialize().await.unwrap();
    let first = session.list_tools().await.unwrap();
    let second = session.list_tools().await.unwrap();
    assert_eq!(first, second);
    assert_eq!(session.catalog().len(), first.len());
}

#[tokio::test]
async fn bound_tools_drop_null_arguments_and_return_text() {
    let upstream = httpmock::MockServer::start();
    london_mock(&upstream);
    let base = spawn_server(&upstream.base_url()).await;

    let session = Arc::new(Session::connect(base.as_str()));
    session.initialize().await.unwrap();
    session.list_tools().await.unwrap();

    let callables = bind_catalog(&session);
    assert_eq!(callables.len(), 3);
    let weather = callables
        .iter()
        .find(|t| t.name() == "get_weather")
        .unwrap();

    let mut args = Map::new();
    args.insert("location".into(), json!("London"));
    // A model frequently emits nulls for optional slots; they must vanish.
    args.insert("units".into(), Value::Null);
    let out = weather.invoke(args).await;
    assert!(out.contains("London"));
}

#[tokio::test]
async fn adapter_turns_protocol_errors_into_text() {
    let upstream = httpmock::MockServer::start();
    let base = spawn_server(&upstream.base_url()).await;

    let session = Arc::new(Session::connect(base.as_str()));
    session.initialize().await.unwrap();
    session.list_tools().await.unwrap();

    let callables = bind_catalog(&session);
    let weather = callables
        .iter()
        .find(|t| t.name() == "get_weather")
        .unwrap();

    // No location: the server answers -32602 and the adapter renders it.
    let out = weather.invoke(Map::new()).await;
    assert!(out.starts_with("Error executing get_weather:"));
    assert!(out.contains("-32602"));
}

#[tokio::test]
async fn closed_sessions_stay_closed() {
    let upstream = httpmock::MockServer::start();
    let base = spawn_server(&upstream.base_url()).await;

    let session = Session::connect(base.as_str());
    session.initialize().await.unwrap();
    session.close();

    assert!(matches!(
        session.list_tools().await.unwrap_err(),
        ClientError::Closed
    ));
    assert!(matches!(
        session.initialize().await.unwrap_err(),
        ClientError::Closed
    ));
}

#[tokio::test]
async fn greeting_and_time_round_trip_without_upstreams() {
    let base = spawn_server("http://127.0.0.1:9").await;

    let session = Session::connect(base.as_str());
    session.initialize().await.unwrap();
    session.list_tools().await.unwrap();

    let greeting = session
        .call_tool("get_greeting", json!({ "name": "Ada" }))
        .await
        .unwrap();
    assert_eq!(greeting, "Hello, Ada! Welcome to the MCP server.");

    let time = session.call_tool("get_time", json!({})).await.unwrap();
    assert!(time.starts_with("Current time: "));
}
