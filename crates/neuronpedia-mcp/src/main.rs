//! neuronpedia-mcp: Neuronpedia MCP Server Binary
//!
//! Serves the Neuronpedia tool catalog to MCP clients over stdio.
//!
//! Usage:
//!   neuronpedia-mcp                  - Start the stdio server
//!   neuronpedia-mcp --config <path>  - Start with an explicit config file
//!   neuronpedia-mcp --list-tools     - Print the tool catalog as JSON
//!   neuronpedia-mcp --help           - Show help

use std::path::PathBuf;

use np_core::Config;
use np_mcp::NeuronpediaServer;
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use tracing_subscriber::EnvFilter;

/// Run mode
#[derive(Debug, PartialEq)]
enum RunMode {
    /// MCP server on stdin/stdout
    Serve { config: Option<PathBuf> },
    /// Print the catalog and exit
    ListTools { config: Option<PathBuf> },
    /// Show help
    Help,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mode = parse_args(std::env::args().skip(1))?;

    let config_path = match mode {
        RunMode::Help => {
            print_help();
            return Ok(());
        }
        RunMode::Version => {
            println!("neuronpedia-mcp {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        RunMode::Serve { ref config } | RunMode::ListTools { ref config } => config.clone(),
    };

    // Load .env file
    dotenvy::dotenv().ok();

    // stdout carries the protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = Config::load(config_path.as_deref())
        .map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    let server = NeuronpediaServer::new(&config)
        .map_err(|e| anyhow::anyhow!("Failed to create server: {}", e))?;

    if let RunMode::ListTools { .. } = mode {
        println!("{}", serde_json::to_string_pretty(&server.definitions())?);
        return Ok(());
    }

    tracing::info!("Base URL: {}", config.neuronpedia.base_url);
    tracing::info!("Neuronpedia MCP server running on stdio");

    let service = server.serve(stdio()).await?;
    service.waiting().await?;

    tracing::info!("Shutting down...");
    Ok(())
}

/// Parse command line arguments
fn parse_args<I>(args: I) -> anyhow::Result<RunMode>
where
    I: IntoIterator<Item = String>,
{
    let mut config = None;
    let mut list_tools = false;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(RunMode::Help),
            "--version" | "-v" => return Ok(RunMode::Version),
            "--list-tools" => list_tools = true,
            "--config" | "-c" => {
                let path = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a path"))?;
                config = Some(PathBuf::from(path));
            }
            other => anyhow::bail!("Unknown argument: {}", other),
        }
    }

    if list_tools {
        Ok(RunMode::ListTools { config })
    } else {
        Ok(RunMode::Serve { config })
    }
}

/// Print help message
fn print_help() {
    println!("neuronpedia-mcp - Neuronpedia MCP Server");
    println!();
    println!("Usage:");
    println!("  neuronpedia-mcp                  Start the MCP server on stdio");
    println!("  neuronpedia-mcp --config <path>  Use the given TOML config file");
    println!("  neuronpedia-mcp --list-tools     Print the tool catalog as JSON");
    println!("  neuronpedia-mcp --help           Show this help message");
    println!("  neuronpedia-mcp --version        Show version");
    println!();
    println!("Environment Variables:");
    println!("  NEURONPEDIA_API_KEY              API key (required for tool calls)");
    println!("  NEURONPEDIA_BASE_URL             API endpoint (default: https://www.neuronpedia.org/api)");
    println!("  NEURONPEDIA_EXPLANATION_ADMIN    Expose score/delete explanation tools (default: false)");
    println!("  NEURONPEDIA_MCP_CONFIG           Path to config file (default: ./neuronpedia-mcp.toml)");
    println!("  RUST_LOG                         Log filter (default: info)");
}
