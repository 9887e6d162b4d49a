use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use crate::config::{Config, get_config_dir};
use crate::mcp::protocol::Implementation;
use crate::mcp::registry::ToolRegistry;
use crate::mcp::server::McpServer;
use crate::mcp::tools::{GetForecastHandler, GetWeatherHandler};
use crate::weather::{StaticWeatherProvider, WeatherProvider};

/// Compose a server from configuration: provider, registry, identity.
///
/// Registration happens here, before the serve loop starts; the registry is
/// read-only from then on.
#[inline]
pub fn build_server(config: &Config) -> McpServer {
    let provider: Arc<dyn WeatherProvider> =
        Arc::new(StaticWeatherProvider::from_config(&config.weather));

    let mut registry = ToolRegistry::new();
    registry.register(
        GetWeatherHandler::tool_definition(),
        GetWeatherHandler::new(Arc::clone(&provider)),
    );
    registry.register(
        GetForecastHandler::tool_definition(),
        GetForecastHandler::new(provider),
    );

    let server_info = Implementation {
        name: config.server.name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    McpServer::new(server_info, registry)
}

/// Start the MCP server on stdio
#[inline]
pub async fn serve() -> Result<()> {
    let config_dir = get_config_dir()?;
    let config = Config::load(&config_dir).context("Failed to load configuration")?;

    let server = build_server(&config);
    info!(
        "Serving {} tools as '{}'",
        server.router().registry().len(),
        config.server.name
    );

    tokio::select! {
        result = server.serve_stdio() => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Received interrupt signal, shutting down");
        }
    }

    Ok(())
}

/// Print the tools the server exposes
#[inline]
pub fn list_tools() -> Result<()> {
    let config_dir = get_config_dir()?;
    let config = Config::load(&config_dir).context("Failed to load configuration")?;
    let server = build_server(&config);

    let tools = server.router().registry().list();
    println!("Registered tools ({} total):", tools.len());
    println!();

    for tool in tools {
        println!("🔧 {}", tool.name);
        println!("   {}", tool.description);
        println!("   Input schema: {}", tool.input_schema);
        println!();
    }

    Ok(())
}

/// Print the active configuration as TOML
#[inline]
pub fn show_config() -> Result<()> {
    let config_dir = get_config_dir()?;
    let config = Config::load(&config_dir).context("Failed to load configuration")?;

    println!("Configuration directory: {}", config_dir.display());
    println!();
    print!(
        "{}",
        toml::to_string_pretty(&config).context("Failed to serialize config to TOML")?
    );

    Ok(())
}
