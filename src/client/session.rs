//! Stateful handshake wrapper around one transport.
//!
//! A session moves `Uninitialized → Initialized → Closed` and never back.
//! `list_tools` and `call_tool` are hard-gated on a successful handshake:
//! servers may key behavior off negotiated capabilities, so skipping the
//! handshake is treated as a caller bug, not leniently allowed.

use std::sync::RwLock;

use serde_json::{json, Value as J};

use crate::client::catalog::Catalog;
use crate::client::transport::HttpTransport;
use crate::core::content::CallToolResult;
use crate::core::error::ClientError;
use crate::core::rpc::{InitializeResult, PROTOCOL_VERSION};
use crate::core::tool::{ListToolsResult, ToolDefinition};

#[derive(Debug, Clone, PartialEq)]
enum State {
    Uninitialized,
    Initialized {
        protocol_version: String,
        capabilities: J,
    },
    Closed,
}

pub struct Session {
    transport: HttpTransport,
    state: RwLock<State>,
    catalog: RwLock<Catalog>,
}

impl Session {
    /// Session over a fresh transport to `base`. The transport, and with it
    /// the request-id sequence, belongs to this session alone.
    pub fn connect(base: impl Into<String>) -> Self {
        Self::over(HttpTransport::new(base))
    }

    pub fn over(transport: HttpTransport) -> Self {
        Self {
            transport,
            state: RwLock::new(State::Uninitialized),
            catalog: RwLock::new(Catalog::default()),
        }
    }

    /// Perform the handshake. Safe to repeat: a re-initialize renegotiates
    /// and must land on the same values. On failure the session stays where
    /// it was and the error is re-raised.
    pub async fn initialize(&self) -> Result<InitializeResult, ClientError> {
        if *self.state.read().expect("state lock") == State::Closed {
            return Err(ClientError::Closed);
        }
        let params = json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": { "tools": {} },
            "clientInfo": {
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
            },
        });
        let result = self.transport.send("initialize", params).await?;
        let init: InitializeResult =
            serde_json::from_value(result).map_err(|e| ClientError::Malformed(e.to_string()))?;
        // Handshake completes with the one-way initialized notification;
        // only a fully completed handshake flips the state.
        self.transport
            .notify("notifications/initialized", json!({}))
            .await?;
        *self.state.write().expect("state lock") = State::Initialized {
            protocol_version: init.protocol_version.clone(),
            capabilities: init.capabilities.clone(),
        };
        tracing::debug!(
            server = %init.server_info.name,
            protocol = %init.protocol_version,
            "session initialized"
        );
        Ok(init)
    }

    /// Fetch the server's tool list and swap the cached catalog wholesale;
    /// readers never observe a half-updated catalog.
    pub async fn list_tools(&self) -> Result<Vec<ToolDefinition>, ClientError> {
        self.ensure_initialized()?;
        let result = self.transport.send("tools/list", json!({})).await?;
        let parsed: ListToolsResult =
            serde_json::from_value(result).map_err(|e| ClientError::Malformed(e.to_string()))?;
        *self.catalog.write().expect("catalog lock") = Catalog::from_tools(parsed.tools.clone());
        Ok(parsed.tools)
    }

    /// Invoke a tool by name and unwrap the single text block of its result.
    /// The name must exist in the most recently fetched catalog.
    pub async fn call_tool(&self, name: &str, arguments: J) -> Result<String, ClientError> {
        self.ensure_initialized()?;
        if !self.catalog.read().expect("catalog lock").contains(name) {
            return Err(ClientError::UnknownTool(name.to_string()));
        }
        let result = self
            .transport
            .send("tools/call", json!({ "name": name, "arguments": arguments }))
            .await?;
        let parsed: CallToolResult =
            serde_json::from_value(result).map_err(|e| ClientError::Malformed(e.to_string()))?;
        parsed
            .into_text()
            .ok_or_else(|| ClientError::Malformed("tool result carries no text content".into()))
    }

    /// Close the session. Everything after this fails with a closed-state
    /// error; there is no reopen.
    pub fn close(&self) {
        *self.state.write().expect("state lock") = State::Closed;
    }

    pub fn is_initialized(&self) -> bool {
        matches!(
            *self.state.read().expect("state lock"),
            State::Initialized { .. }
        )
    }

    /// Protocol version negotiated at initialize time, if any.
    pub fn protocol_version(&self) -> Option<String> {
        match &*self.state.read().expect("state lock") {
            State::Initialized {
                protocol_version, ..
            } => Some(protocol_version.clone()),
            _ => None,
        }
    }

    /// Snapshot of the current catalog.
    pub fn catalog(&self) -> Catalog {
        self.catalog.read().expect("catalog lock").clone()
    }

    fn ensure_initialized(&self) -> Result<(), ClientError> {
        match &*self.state.read().expect("state lock") {
            State::Initialized { .. } => Ok(()),
            State::Uninitialized => Err(ClientError::NotInitialized),
            State::Closed => Err(ClientError::Closed),
        }
    }
}
