//! JSON-RPC envelope shared by both halves of the bridge.
//!
//! The server deserializes `RpcReq` and answers with `RpcResp`; the client
//! builds the same structures going the other way. Requests without an `id`
//! are one-way notifications and receive no response body.

use serde::{Deserialize, Serialize};
use serde_json::Value as J;

pub const JSONRPC_VERSION: &str = "2.0";

/// Protocol revision spoken on the wire, echoed by `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Fixed error code taxonomy. Responses never carry codes outside this set.
pub mod code {
    pub const PARSE_ERROR: i32 = -32700;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcReq {
    pub jsonrpc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<J>,
    pub method: String,
    #[serde(default)]
    pub params: J,
}

impl RpcReq {
    pub fn call(id: u64, method: impl Into<String>, params: J) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.into(),
            id: Some(J::from(id)),
            method: method.into(),
            params,
        }
    }

    /// A request with no `id`: fire-and-forget, no response expected.
    pub fn notification(method: impl Into<String>, params: J) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.into(),
            id: None,
            method: method.into(),
            params,
        }
    }

    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResp {
    pub jsonrpc: String,
    pub id: J,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<J>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcErr>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcErr {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<J>,
}

pub fn ok(id: J, result: J) -> RpcResp {
    RpcResp {
        jsonrpc: JSONRPC_VERSION.into(),
        id,
        result: Some(result),
        error: None,
    }
}

pub fn err(id: J, code: i32, msg: impl Into<String>, data: Option<J>) -> RpcResp {
    RpcResp {
        jsonrpc: JSONRPC_VERSION.into(),
        id,
        result: None,
        error: Some(RpcErr {
            code,
            message: msg.into(),
            data,
        }),
    }
}

// --- Handshake payloads ---

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: String,
    pub server_info: ServerInfo,
    #[serde(default)]
    pub capabilities: J,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}
