//! weatherbot - an OpenWeatherMap lookup tool for agent frameworks.

mod tools;

use std::collections::HashMap;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::tools::registry::ToolRegistry;
use crate::tools::weather::WeatherTool;

const VERSION: &str = "0.1.0";

#[derive(Parser)]
#[command(name = "weatherbot", about = "weatherbot - Weather lookup tool", version = VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up current weather for a location.
    Lookup {
        /// City name, optionally with country code (e.g. "London,UK").
        location: String,
        /// OpenWeatherMap API key. Defaults to OPENWEATHER_API_KEY.
        #[arg(short, long)]
        api_key: Option<String>,
    },
    /// Print the registered tool definitions as JSON.
    Tools,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match cli.command {
        Commands::Lookup { location, api_key } => cmd_lookup(location, api_key),
        Commands::Tools => cmd_tools(),
    }
}

/// Build the tool registry the way a hosting agent framework would.
fn build_registry(api_key: Option<String>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(WeatherTool::new(api_key)));
    registry
}

fn cmd_lookup(location: String, api_key: Option<String>) -> Result<()> {
    let registry = build_registry(api_key);

    let runtime = tokio::runtime::Runtime::new()?;
    let output = runtime.block_on(async {
        let mut params = HashMap::new();
        params.insert("location".to_string(), serde_json::Value::String(location));
        registry.invoke("get_weather", params).await
    });

    println!("{}", output);
    Ok(())
}

fn cmd_tools() -> Result<()> {
    let registry = build_registry(None);

    for definition in registry.definitions() {
        println!("{}", serde_json::to_string_pretty(&definition)?);
    }
    Ok(())
}
