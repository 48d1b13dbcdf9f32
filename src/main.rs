use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    mcp_bridge::infra::logging::init();
    mcp_bridge::cli::run().await
}
