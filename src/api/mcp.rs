//! JSON-RPC dispatcher for the `/mcp` endpoint, plus the read-only
//! descriptor routes.
//!
//! The dispatcher is stateless per request: everything it needs arrives in
//! the request and the immutable registry handed to it at startup. Error
//! codes never leave the fixed set (-32601, -32602, -32603).

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value as J};
use std::time::Instant;

use crate::core::content::{render_value, CallToolResult};
use crate::core::rpc::{self, code, RpcReq, RpcResp, ServerInfo, PROTOCOL_VERSION};
use crate::core::tool::missing_required;
use crate::tools::registry::ToolRegistry;

#[derive(Clone)]
pub struct AppState {
    pub registry: ToolRegistry,
    pub server: ServerInfo,
}

fn initialize_result(server: &ServerInfo) -> J {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": { "tools": {} },
        "serverInfo": { "name": server.name, "version": server.version },
    })
}

fn tools_list(registry: &ToolRegistry) -> J {
    json!({ "tools": registry.advertise(), "cursor": J::Null })
}

async fn call_tool(state: &AppState, id: J, params: &J) -> RpcResp {
    let Some(name) = params.get("name").and_then(J::as_str) else {
        return rpc::err(
            id,
            code::INVALID_PARAMS,
            "Invalid params: tool name is required",
            None,
        );
    };
    let Some(tool) = state.registry.get(name) else {
        return rpc::err(
            id,
            code::METHOD_NOT_FOUND,
            format!("Method not found: {name}"),
            None,
        );
    };
    let empty = json!({});
    let args = params.get("arguments").unwrap_or(&empty);

    // Required arguments are enforced here, once; the tool body never runs
    // with an incomplete argument set.
    if let Some(missing) = missing_required(&tool.input_schema(), args) {
        return rpc::err(
            id,
            code::INVALID_PARAMS,
            format!("Invalid params: {missing} is required"),
            None,
        );
    }

    let start = Instant::now();
    match tool.call(args).await {
        Ok(value) => {
            metrics::histogram!("mcp_tool_call_seconds").record(start.elapsed().as_secs_f64());
            rpc::ok(id, json!(CallToolResult::text(render_value(&value))))
        }
        Err(e) => {
            metrics::counter!("mcp_tool_call_failures_total").increment(1);
            rpc::err(id, code::INTERNAL_ERROR, format!("Internal error: {e}"), None)
        }
    }
}

async fn dispatch(state: &AppState, id: J, method: &str, params: &J) -> RpcResp {
    match method {
        "initialize" => rpc::ok(id, initialize_result(&state.server)),
        "notifications/initialized" => rpc::ok(id, J::Null),
        "tools/list" => rpc::ok(id, tools_list(&state.registry)),
        "tools/call" => call_tool(state, id, params).await,
        other => rpc::err(
            id,
            code::METHOD_NOT_FOUND,
            format!("Method not found: {other}"),
            None,
        ),
    }
}

// HTTP handler
pub async fn http(State(state): State<AppState>, Json(req): Json<RpcReq>) -> Response {
    tracing::debug!(method = %req.method, id = ?req.id, "mcp request");
    metrics::counter!("mcp_requests_total").increment(1);

    // Notifications get an acknowledgement with no body, never an error.
    if req.is_notification() {
        return StatusCode::ACCEPTED.into_response();
    }

    let id = req.id.clone().unwrap_or(J::Null);
    let resp = dispatch(&state, id, &req.method, &req.params).await;
    if let Some(err) = &resp.error {
        tracing::warn!(code = err.code, message = %err.message, method = %req.method, "mcp error response");
    }
    Json(resp).into_response()
}

pub async fn health(State(state): State<AppState>) -> Json<J> {
    Json(json!({ "status": "healthy", "server": state.server.name }))
}

pub async fn root(State(state): State<AppState>) -> Json<J> {
    Json(json!({
        "name": state.server.name,
        "version": state.server.version,
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": { "tools": {} },
        "endpoints": { "mcp": "/mcp", "health": "/health" },
    }))
}
