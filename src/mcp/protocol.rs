//! Protocol Types and Line Codec
//!
//! Wire types for the JSON-RPC-style tool-invocation protocol, one message
//! per line. Decoding is tolerant: any line that does not parse into a
//! request envelope is reported as malformed and skipped by the caller.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::mcp::errors::McpError;

/// Protocol version advertised by `initialize`
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// JSON-RPC 2.0 version identifier
pub const JSONRPC_VERSION: &str = "2.0";

/// Unique identifier for id-bearing requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    String(String),
    Number(i64),
}

/// Incoming request envelope.
///
/// A missing `id` marks the request as a notification; no response may be
/// written for it. `params` defaults to an empty object when absent.
#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    pub method: String,
    #[serde(default = "empty_params")]
    pub params: Value,
    #[serde(default)]
    pub id: Option<RequestId>,
}

fn empty_params() -> Value {
    Value::Object(Map::new())
}

/// Outgoing response envelope, only ever built for id-bearing requests.
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    pub jsonrpc: &'static str,
    pub id: RequestId,
    pub result: Value,
}

impl Request {
    /// Decode one line into a request envelope.
    ///
    /// Unparseable JSON and valid JSON that is not a request object both
    /// signal [`McpError::MalformedMessage`].
    #[inline]
    pub fn decode(line: &str) -> Result<Self, McpError> {
        serde_json::from_str(line).map_err(|e| McpError::MalformedMessage {
            message: e.to_string(),
        })
    }

    /// Whether the request expects a response
    #[inline]
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

impl Response {
    /// Create a new response for the given request id
    #[inline]
    pub fn new(id: RequestId, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result,
        }
    }
}

/// Server identity reported by `initialize`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Implementation {
    pub name: String,
    pub version: String,
}

/// Server capabilities reported by `initialize`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerCapabilities {
    pub tools: ToolsCapability,
}

/// Tools capability, currently an empty object on the wire
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolsCapability {}

/// `initialize` result payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: Implementation,
}

/// Tool definition as exposed by `tools/list`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// `tools/list` result payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListToolsResult {
    pub tools: Vec<Tool>,
}

/// `tools/call` request parameters
#[derive(Debug, Clone, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

/// `tools/call` result envelope.
///
/// Both successful and failed invocations use this shape; failure is
/// signalled by `isError`, never by a transport-level error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallToolResult {
    pub content: Vec<ToolContent>,
    #[serde(rename = "isError")]
    pub is_error: bool,
}

/// Tool content payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ToolContent {
    #[serde(rename = "text")]
    Text { text: String },
}

impl CallToolResult {
    /// Wrap a JSON-encoded payload as a successful invocation
    #[inline]
    pub fn success(text: String) -> Self {
        Self {
            content: vec![ToolContent::Text { text }],
            is_error: false,
        }
    }

    /// Wrap a JSON-encoded payload as a failed invocation
    #[inline]
    pub fn error(text: String) -> Self {
        Self {
            content: vec![ToolContent::Text { text }],
            is_error: true,
        }
    }
}
