use thiserror::Error;

pub type Result<T> = std::result::Result<T, WeatherMcpError>;

#[derive(Error, Debug)]
pub enum WeatherMcpError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

pub mod commands;
pub mod config;
pub mod mcp;
pub mod weather;
