use clap::{Parser, Subcommand};
use weather_mcp::Result;
use weather_mcp::commands::{list_tools, serve, show_config};

#[derive(Parser)]
#[command(name = "weather-mcp")]
#[command(about = "Minimal MCP server exposing weather lookup tools over stdio")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the MCP server on stdio
    Serve,
    /// List the tools the server exposes
    Tools,
    /// Show the current configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the protocol stream; diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => {
            serve().await?;
        }
        Commands::Tools => {
            list_tools()?;
        }
        Commands::Config => {
            show_config()?;
        }
    }

    Ok(())
}
