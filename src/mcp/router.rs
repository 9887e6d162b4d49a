//! Request Router
//!
//! Maps the built-in method names onto the registry and converts every
//! per-request failure into a protocol-shaped result value. Nothing raised
//! by a tool handler escapes `tools/call`; one broken tool must never take
//! down the serve loop.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::mcp::errors::McpError;
use crate::mcp::protocol::{
    CallToolParams, CallToolResult, Implementation, InitializeResult, ListToolsResult,
    PROTOCOL_VERSION, ServerCapabilities,
};
use crate::mcp::registry::ToolRegistry;
use crate::mcp::validation::validate_arguments;

/// Stateless dispatcher over an immutable registry.
///
/// Constructed once at startup with the registry passed in; there is no
/// global reachability and multiple routers can coexist in one process.
pub struct Router {
    server_info: Implementation,
    registry: ToolRegistry,
}

impl Router {
    /// Create a router for the given identity and registry
    #[inline]
    pub fn new(server_info: Implementation, registry: ToolRegistry) -> Self {
        Self {
            server_info,
            registry,
        }
    }

    /// The registry this router dispatches against
    #[inline]
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Route a decoded request to its method handler.
    ///
    /// Always produces a result value; failures are embedded in the result
    /// per the error taxonomy rather than propagated.
    #[inline]
    pub async fn dispatch(&self, method: &str, params: Value) -> Value {
        debug!("Dispatching method: {}", method);

        match method {
            "initialize" => encode_result(&self.handle_initialize()),
            "tools/list" => encode_result(&self.handle_list_tools()),
            "tools/call" => encode_result(&self.handle_call_tool(params).await),
            _ => {
                // Unknown methods surface as a plain error-bearing result,
                // not an isError envelope.
                warn!("Unknown method: {}", method);
                McpError::UnknownMethod {
                    method: method.to_string(),
                }
                .error_payload()
            }
        }
    }

    /// `initialize`: static capability descriptor, same for every call
    fn handle_initialize(&self) -> InitializeResult {
        InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities::default(),
            server_info: self.server_info.clone(),
        }
    }

    /// `tools/list`: every registered tool with its own declared schema,
    /// in registration order
    fn handle_list_tools(&self) -> ListToolsResult {
        ListToolsResult {
            tools: self.registry.list(),
        }
    }

    /// `tools/call`: look up, validate the argument bag, invoke
    async fn handle_call_tool(&self, params: Value) -> CallToolResult {
        let params: CallToolParams = match serde_json::from_value(params) {
            Ok(params) => params,
            Err(e) => {
                let invalid = McpError::InvalidArguments {
                    tool: "tools/call".to_string(),
                    message: e.to_string(),
                };
                return error_envelope(&invalid);
            }
        };

        let Some(entry) = self.registry.get(&params.name) else {
            warn!("Tool not found: {}", params.name);
            let not_found = McpError::ToolNotFound { name: params.name };
            return error_envelope(&not_found);
        };

        if let Err(invalid) =
            validate_arguments(&params.name, &entry.definition.input_schema, &params.arguments)
        {
            debug!("Rejected arguments for '{}': {}", params.name, invalid);
            return error_envelope(&invalid);
        }

        match entry.handler.invoke(params.arguments).await {
            Ok(value) => CallToolResult::success(value.to_string()),
            Err(e) => {
                error!("Tool '{}' invocation failed: {}", params.name, e);
                let fault = McpError::HandlerFault {
                    tool: params.name,
                    message: e.to_string(),
                };
                error_envelope(&fault)
            }
        }
    }
}

/// Serialize a typed result into the response value.
///
/// Encoding a result type cannot normally fail; if it does, the failure is
/// reported in-band as an error-bearing result.
fn encode_result<T: Serialize>(result: &T) -> Value {
    match serde_json::to_value(result) {
        Ok(value) => value,
        Err(e) => {
            error!("Failed to encode result: {}", e);
            McpError::HandlerFault {
                tool: String::new(),
                message: e.to_string(),
            }
            .error_payload()
        }
    }
}

/// Wrap a failure in the isError content envelope
fn error_envelope(error: &McpError) -> CallToolResult {
    CallToolResult::error(error.error_payload().to_string())
}
