//! Tool Registry
//!
//! Mapping from tool name to definition and handler. Populated during
//! startup composition, read-only while the serve loop runs, so no
//! synchronization is needed. Registration order is preserved and is the
//! order `tools/list` reports.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::debug;

use crate::mcp::protocol::Tool;

/// Tool handler calling convention.
///
/// Handlers receive the validated argument bag and return any
/// JSON-serializable value. An `Err` is caught at the call site and
/// converted into an isError envelope; it never propagates further.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn invoke(&self, arguments: Map<String, Value>) -> Result<Value>;
}

/// A registered tool: its advertised definition plus its handler
pub struct RegisteredTool {
    pub definition: Tool,
    pub handler: Box<dyn ToolHandler>,
}

/// Append-only, order-preserving registry of tools
#[derive(Default)]
pub struct ToolRegistry {
    entries: Vec<RegisteredTool>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create an empty registry
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, silently replacing any existing entry with the same
    /// name. Replacement keeps the original position in listing order.
    #[inline]
    pub fn register<H>(&mut self, definition: Tool, handler: H)
    where
        H: ToolHandler + 'static,
    {
        let name = definition.name.clone();
        let entry = RegisteredTool {
            definition,
            handler: Box::new(handler),
        };

        if let Some(&position) = self.index.get(&name) {
            self.entries[position] = entry;
        } else {
            self.index.insert(name.clone(), self.entries.len());
            self.entries.push(entry);
        }

        debug!("Registered tool: {}", name);
    }

    /// All tool definitions in registration order, handlers excluded
    #[inline]
    pub fn list(&self) -> Vec<Tool> {
        self.entries
            .iter()
            .map(|entry| entry.definition.clone())
            .collect()
    }

    /// Look up a tool by name
    #[inline]
    pub fn get(&self, name: &str) -> Option<&RegisteredTool> {
        self.index.get(name).map(|&position| &self.entries[position])
    }

    /// Number of registered tools
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct StaticHandler {
        value: Value,
    }

    #[async_trait]
    impl ToolHandler for StaticHandler {
        async fn invoke(&self, _arguments: Map<String, Value>) -> Result<Value> {
            Ok(self.value.clone())
        }
    }

    fn definition(name: &str) -> Tool {
        Tool {
            name: name.to_string(),
            description: format!("{} tool", name),
            input_schema: json!({"type": "object", "properties": {}}),
        }
    }

    #[test]
    fn listing_preserves_registration_order() {
        let mut registry = ToolRegistry::new();
        registry.register(definition("zeta"), StaticHandler { value: json!(1) });
        registry.register(definition("alpha"), StaticHandler { value: json!(2) });
        registry.register(definition("mid"), StaticHandler { value: json!(3) });

        let names: Vec<String> = registry.list().into_iter().map(|t| t.name).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn duplicate_registration_overwrites_in_place() {
        let mut registry = ToolRegistry::new();
        registry.register(definition("first"), StaticHandler { value: json!(1) });
        registry.register(definition("second"), StaticHandler { value: json!(2) });

        let mut replacement = definition("first");
        replacement.description = "replaced".to_string();
        registry.register(replacement, StaticHandler { value: json!(3) });

        assert_eq!(registry.len(), 2);
        let listed = registry.list();
        assert_eq!(listed[0].name, "first");
        assert_eq!(listed[0].description, "replaced");
        assert_eq!(listed[1].name, "second");
    }

    #[tokio::test]
    async fn replacement_swaps_the_handler() {
        let mut registry = ToolRegistry::new();
        registry.register(definition("echo"), StaticHandler { value: json!("old") });
        registry.register(definition("echo"), StaticHandler { value: json!("new") });

        let entry = registry.get("echo").expect("tool is registered");
        let result = entry
            .handler
            .invoke(Map::new())
            .await
            .expect("handler succeeds");
        assert_eq!(result, json!("new"));
    }

    #[test]
    fn unknown_name_returns_none() {
        let registry = ToolRegistry::new();
        assert!(registry.get("missing").is_none());
        assert!(registry.is_empty());
    }
}
