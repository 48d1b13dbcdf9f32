//! HTTP transport: one logical connection to a server's `/mcp` endpoint.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde_json::Value as J;

use crate::core::error::ClientError;
use crate::core::rpc::{RpcReq, RpcResp};
use crate::infra::http::headers::add_standard_headers;

/// Fixed per-call timeout. A call either resolves or fails inside this
/// window; it never hangs.
pub const CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Owns the request-id sequence for one connection: ids start at 1,
/// strictly increase, and are never reused or shared with another
/// transport instance.
pub struct HttpTransport {
    base: String,
    http: reqwest::Client,
    next_id: AtomicU64,
}

impl HttpTransport {
    pub fn new(base: impl Into<String>) -> Self {
        Self::with_timeout(base, CALL_TIMEOUT)
    }

    pub fn with_timeout(base: impl Into<String>, timeout: Duration) -> Self {
        let base = base.into();
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(2).min(timeout))
            .timeout(timeout)
            .build()
            .expect("reqwest client");
        Self {
            base: base.trim_end_matches('/').to_string(),
            http,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/mcp", self.base)
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Send one request and return its `result`. A populated `error` in the
    /// response becomes `ClientError::Protocol`, passed through untouched;
    /// connect/timeout failures become `ClientError::Transport`. No retries.
    pub async fn send(&self, method: &str, params: J) -> Result<J, ClientError> {
        let id = self.next_id();
        let req = RpcReq::call(id, method, params);
        tracing::debug!(method, id, endpoint = %self.endpoint(), "rpc request");

        let (builder, _rid) = add_standard_headers(self.http.post(self.endpoint()), None);
        let resp = builder.json(&req).send().await?;
        if !resp.status().is_success() {
            return Err(ClientError::Transport(format!(
                "http status {}",
                resp.status()
            )));
        }
        let body: RpcResp = resp
            .json()
            .await
            .map_err(|e| ClientError::Malformed(e.to_string()))?;

        // A response is only usable if it echoes the id we issued.
        if body.id != J::from(id) {
            return Err(ClientError::Malformed(format!(
                "response id {} does not match request id {id}",
                body.id
            )));
        }
        if let Some(err) = body.error {
            return Err(ClientError::Protocol {
                code: err.code,
                message: err.message,
            });
        }
        body.result.ok_or_else(|| {
            ClientError::Malformed("response carries neither result nor error".into())
        })
    }

    /// Fire a one-way notification: no id, no response body expected.
    pub async fn notify(&self, method: &str, params: J) -> Result<(), ClientError> {
        let req = RpcReq::notification(method, params);
        tracing::debug!(method, "rpc notification");
        let (builder, _rid) = add_standard_headers(self.http.post(self.endpoint()), None);
        let resp = builder.json(&req).send().await?;
        if !resp.status().is_success() {
            return Err(ClientError::Transport(format!(
                "http status {}",
                resp.status()
            )));
        }
        Ok(())
    }
}
