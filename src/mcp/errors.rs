//! Protocol Error Taxonomy
//!
//! Every failure the dispatch engine can produce, and its mapping onto the
//! wire. Nothing here is fatal to the serve loop: malformed messages are
//! skipped, everything else is converted into a protocol-shaped result.

use serde_json::{Value, json};
use thiserror::Error;

/// Errors arising while decoding, routing, or invoking a request
#[derive(Error, Debug)]
pub enum McpError {
    /// Input line that does not decode into a request envelope. Recovered
    /// locally: no response is emitted and the loop keeps reading.
    #[error("malformed message: {message}")]
    MalformedMessage { message: String },

    /// `tools/call` named a tool that is not registered
    #[error("Tool '{name}' not found")]
    ToolNotFound { name: String },

    /// Arguments rejected by the tool's declared schema before invocation
    #[error("Invalid arguments for tool '{tool}': {message}")]
    InvalidArguments { tool: String, message: String },

    /// A registered handler returned an error during invocation
    #[error("{message}")]
    HandlerFault { tool: String, message: String },

    /// Method name outside the built-in dispatch table
    #[error("Unknown method: {method}")]
    UnknownMethod { method: String },
}

impl McpError {
    /// Wire representation: a JSON object carrying the failure message.
    ///
    /// `tools/call` failures embed this (JSON-encoded) in an isError
    /// content envelope; unknown methods return it as the bare result.
    #[inline]
    pub fn error_payload(&self) -> Value {
        json!({ "error": self.to_string() })
    }
}
