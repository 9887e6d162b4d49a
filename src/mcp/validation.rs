//! Argument Shape Checking
//!
//! Checks a `tools/call` argument bag against the tool's declared input
//! schema before the handler runs. This is deliberate shape checking, not a
//! full JSON Schema implementation: required keys, the
//! `additionalProperties: false` marker, primitive type tags, and numeric
//! bounds. Anything the schema does not declare is left for the handler to
//! reject itself.

use serde_json::{Map, Value};

use crate::mcp::errors::McpError;

/// Validate an argument bag against a tool's declared input schema.
///
/// Rejection is deterministic: the same bag against the same schema always
/// fails with the same message.
#[inline]
pub fn validate_arguments(
    tool: &str,
    schema: &Value,
    arguments: &Map<String, Value>,
) -> Result<(), McpError> {
    let invalid = |message: String| McpError::InvalidArguments {
        tool: tool.to_string(),
        message,
    };

    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        for name in required.iter().filter_map(Value::as_str) {
            if !arguments.contains_key(name) {
                return Err(invalid(format!("missing required property '{}'", name)));
            }
        }
    }

    let properties = schema.get("properties").and_then(Value::as_object);

    if schema.get("additionalProperties").and_then(Value::as_bool) == Some(false) {
        let declared = properties;
        for name in arguments.keys() {
            let known = declared.is_some_and(|props| props.contains_key(name));
            if !known {
                return Err(invalid(format!("unexpected property '{}'", name)));
            }
        }
    }

    let Some(properties) = properties else {
        return Ok(());
    };

    for (name, value) in arguments {
        let Some(declared) = properties.get(name) else {
            continue;
        };

        if let Some(expected) = declared.get("type").and_then(Value::as_str) {
            if !type_matches(expected, value) {
                return Err(invalid(format!(
                    "property '{}' must be of type {}",
                    name, expected
                )));
            }
        }

        if let Some(minimum) = declared.get("minimum").and_then(Value::as_f64) {
            if value.as_f64().is_some_and(|v| v < minimum) {
                return Err(invalid(format!(
                    "property '{}' must be at least {}",
                    name, minimum
                )));
            }
        }

        if let Some(maximum) = declared.get("maximum").and_then(Value::as_f64) {
            if value.as_f64().is_some_and(|v| v > maximum) {
                return Err(invalid(format!(
                    "property '{}' must be at most {}",
                    name, maximum
                )));
            }
        }
    }

    Ok(())
}

fn type_matches(expected: &str, value: &Value) -> bool {
    match expected {
        "string" => value.is_string(),
        "integer" => value.is_i64() || value.is_u64(),
        "number" => value.is_number(),
        "boolean" => value.is_boolean(),
        "object" => value.is_object(),
        "array" => value.is_array(),
        "null" => value.is_null(),
        // Unknown type tags are not enforced
        _ => true,
    }
}
