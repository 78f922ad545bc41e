//! Investment research tool CLI
//!
//! Exercises the tool layer directly, without an LLM in the loop.
//!
//! # Usage
//!
//! ```bash
//! export ALPHA_VANTAGE_API_KEY="your-key"
//!
//! # List the registered tools
//! cargo run --bin invest-agent -p invest-agent -- list
//!
//! # Call one tool with JSON arguments
//! cargo run --bin invest-agent -p invest-agent -- call get_stock_price '{"ticker": "AAPL"}'
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use invest_agent::{AgentConfig, InvestmentService, tools};
use std::env;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "invest-agent", about = "Investment research tool layer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the registered tools with their descriptions
    List,
    /// Call a tool by name with JSON arguments
    Call {
        /// Tool name, e.g. get_stock_price
        name: String,
        /// Tool arguments as a JSON object, e.g. '{"ticker": "AAPL"}'
        #[arg(default_value = "{}")]
        args: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            env::var("RUST_LOG").unwrap_or_else(|_| "warn,invest_agent=info".to_string()),
        )
        .init();

    let cli = Cli::parse();

    let config = AgentConfig::from_env()?;
    if !config.search_enabled() {
        eprintln!("Research search not configured; search_investment_research will return status=info.");
    }

    let service = Arc::new(InvestmentService::from_config(&config)?);
    let registry = tools::registry(service);

    match cli.command {
        Command::List => {
            for tool in registry.tools() {
                println!("{:<32} {}", tool.name(), tool.description());
            }
        }
        Command::Call { name, args } => {
            let params = serde_json::from_str(&args).context("arguments must be a JSON object")?;
            let result = registry.execute(&name, params).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
