//! Dispatch Loop
//!
//! Single-task read-eval-respond loop over buffered line I/O. The loop has
//! two states: reading the next line, and terminated on end-of-stream.
//! Decode failures and per-request errors are absorbed; closing the input
//! stream is the only way to stop serving.

use anyhow::Result;
use serde_json::json;
use tokio::io::{self, AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

use crate::mcp::protocol::{Implementation, Request, Response};
use crate::mcp::registry::ToolRegistry;
use crate::mcp::router::Router;

/// The protocol server: a router plus the loop that drives it
pub struct McpServer {
    router: Router,
}

impl McpServer {
    /// Create a server from an identity and a fully populated registry
    #[inline]
    pub fn new(server_info: Implementation, registry: ToolRegistry) -> Self {
        Self {
            router: Router::new(server_info, registry),
        }
    }

    /// The router driving this server
    #[inline]
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Serve requests over stdin/stdout until EOF
    #[inline]
    pub async fn serve_stdio(&self) -> Result<()> {
        info!("Starting MCP server with stdio transport");
        self.serve(io::stdin(), io::stdout()).await
    }

    /// Serve requests over arbitrary line-delimited streams until EOF.
    ///
    /// Responses are written in exactly the order their requests were read;
    /// every line is fully processed, including its response write, before
    /// the next line is read.
    #[inline]
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut reader = BufReader::new(reader);
        let mut line = String::new();

        loop {
            line.clear();
            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("EOF reached, closing connection");
                    break;
                }
                Ok(_) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    self.process_line(line, &mut writer).await?;
                }
                Err(e) => {
                    error!("Error reading from input: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Process one input line: decode, route, respond if an id was present
    async fn process_line<W>(&self, line: &str, writer: &mut W) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let request = match Request::decode(line) {
            Ok(request) => request,
            Err(e) => {
                // Best-effort transport: undecodable lines are dropped
                // without a response.
                debug!("Skipping undecodable line: {}", e);
                return Ok(());
            }
        };

        let Request { method, params, id } = request;
        let result = self.router.dispatch(&method, params).await;

        // Notifications never produce output
        let Some(id) = id else {
            return Ok(());
        };

        let response = Response::new(id, result);
        match serde_json::to_string(&response) {
            Ok(payload) => self.write_line(writer, &payload).await?,
            Err(e) => {
                // Loop-boundary catch: report without an id and keep serving
                error!("Failed to serialize response: {}", e);
                let diagnostic = json!({ "error": e.to_string() }).to_string();
                self.write_line(writer, &diagnostic).await?;
            }
        }

        Ok(())
    }

    /// Write one response line, flushed immediately
    async fn write_line<W>(&self, writer: &mut W, payload: &str) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        writer.write_all(payload.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
        Ok(())
    }
}
