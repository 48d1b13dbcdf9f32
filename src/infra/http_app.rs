use axum::{
    routing::{get, post},
    Router,
};

use crate::api::mcp::{self, AppState};
use crate::core::rpc::ServerInfo;
use crate::tools::registry::ToolRegistry;

/// Protocol app: JSON-RPC at `/mcp`, descriptor at `/`, liveness at `/health`.
pub fn build_app(registry: ToolRegistry, server: ServerInfo) -> Router {
    let state = AppState { registry, server };
    Router::new()
        .route("/", get(mcp::root))
        .route("/health", get(mcp::health))
        .route("/mcp", post(mcp::http))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use hyper::Request;
    use tower::ServiceExt;

    #[tokio::test]
    async fn app_serves_health() {
        let app = build_app(
            ToolRegistry::default(),
            ServerInfo {
                name: "t".into(),
                version: "0".into(),
            },
        );
        let resp = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(resp.status().is_success());
    }
}
