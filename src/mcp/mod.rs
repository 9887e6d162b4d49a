//! MCP Server Implementation
//!
//! A JSON-RPC-style tool-invocation protocol served over line-delimited
//! text streams: a tool registry, a line codec, a method router, and the
//! dispatch loop that drives them until the input stream closes.

pub mod errors;
pub mod protocol;
pub mod registry;
pub mod router;
pub mod server;
pub mod tools;
pub mod validation;


pub use errors::McpError;
pub use protocol::{
    CallToolParams, CallToolResult, Implementation, Request, RequestId, Response, Tool,
    ToolContent,
};
pub use registry::{RegisteredTool, ToolHandler, ToolRegistry};
pub use router::Router;
pub use server::McpServer;
