use clap::{Parser, Subcommand};
use std::process::ExitCode;

use crate::client::Session;

#[derive(Parser)]
#[command(name = "mcp-bridge")]
#[command(about = "HTTP MCP bridge - tool server and client")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the tool server
    Serve,
    /// Health check a running server
    Health {
        /// Server URL to check
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
    /// Initialize a session and list the server's tools
    Tools {
        /// Server URL to query
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
    /// Call a tool with a JSON argument object
    Call {
        /// Server URL to call
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
        /// Tool name as advertised by tools/list
        name: String,
        /// Arguments as a JSON object
        #[arg(default_value = "{}")]
        arguments: String,
    },
}

pub async fn run() -> ExitCode {
    let cli = Cli::parse();
    run_commands(cli.command.unwrap_or(Commands::Serve)).await
}

pub async fn run_commands(command: Commands) -> ExitCode {
    match command {
        Commands::Serve => match crate::infra::boot::run_server().await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("❌ Server failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Health { url } => match health_check(&url).await {
            Ok(server) => {
                println!("✅ Service is healthy: {}", server);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Health check failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Tools { url } => match list_tools(&url).await {
            Ok(_) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("❌ Listing tools failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Call {
            url,
            name,
            arguments,
        } => match call_tool(&url, &name, &arguments).await {
            Ok(_) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("❌ Tool call failed: {}", e);
                ExitCode::FAILURE
            }
        },
    }
}

async fn health_check(url: &str) -> Result<String, Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/health", url.trim_end_matches('/')))
        .timeout(std::time::Duration::from_secs(5))
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(format!("HTTP {}", response.status()).into());
    }
    let body: serde_json::Value = response.json().await?;
    Ok(body["server"].as_str().unwrap_or("unknown").to_string())
}

async fn list_tools(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::connect(url);
    let init = session.initialize().await?;
    println!(
        "🔌 Connected to {} v{} (protocol {})",
        init.server_info.name, init.server_info.version, init.protocol_version
    );

    let tools = session.list_tools().await?;
    println!("🔧 {} tools available:", tools.len());
    for tool in &tools {
        let required = tool.required().join(", ");
        if required.is_empty() {
            println!("  - {}: {}", tool.name, tool.description);
        } else {
            println!(
                "  - {}: {} (requires: {})",
                tool.name, tool.description, required
            );
        }
    }
    Ok(())
}

async fn call_tool(url: &str, name: &str, arguments: &str) -> Result<(), Box<dyn std::error::Error>> {
    let args: serde_json::Value = serde_json::from_str(arguments)?;
    if !args.is_object() {
        return Err("arguments must be a JSON object".into());
    }

    let session = Session::connect(url);
    session.initialize().await?;
    session.list_tools().await?;

    let text = session.call_tool(name, args).await?;
    println!("{}", text);
    Ok(())
}
