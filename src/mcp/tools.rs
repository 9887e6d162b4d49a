//! Sample Weather Tools
//!
//! Concrete tool handlers exposed by the server. Both sit on top of the
//! injectable weather provider; the dispatch engine knows nothing about
//! them beyond the handler calling convention.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tracing::debug;

use crate::mcp::protocol::Tool;
use crate::mcp::registry::ToolHandler;
use crate::weather::WeatherProvider;

/// Current-conditions lookup tool
pub struct GetWeatherHandler {
    provider: Arc<dyn WeatherProvider>,
}

/// Multi-day forecast tool
pub struct GetForecastHandler {
    provider: Arc<dyn WeatherProvider>,
}

impl GetWeatherHandler {
    /// Create a new get_weather handler
    #[inline]
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// Create the get_weather tool definition
    #[inline]
    pub fn tool_definition() -> Tool {
        Tool {
            name: "get_weather".to_string(),
            description: "Get current weather for a location".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "location": {
                        "type": "string",
                        "description": "City name"
                    }
                },
                "required": ["location"],
                "additionalProperties": false
            }),
        }
    }
}

#[async_trait]
impl ToolHandler for GetWeatherHandler {
    #[inline]
    async fn invoke(&self, arguments: Map<String, Value>) -> Result<Value> {
        let location = arguments
            .get("location")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow!("Missing required parameter: location"))?;

        debug!("Looking up current weather for '{}'", location);

        let observation = self.provider.current(location);
        Ok(json!({
            "location": location,
            "temperature": observation.temperature,
            "condition": observation.condition,
            "humidity": observation.humidity,
            "unit": "celsius"
        }))
    }
}

impl GetForecastHandler {
    /// Create a new get_forecast handler
    #[inline]
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// Create the get_forecast tool definition
    #[inline]
    pub fn tool_definition() -> Tool {
        Tool {
            name: "get_forecast".to_string(),
            description: "Get weather forecast for a location".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "location": {
                        "type": "string",
                        "description": "City name"
                    },
                    "days": {
                        "type": "integer",
                        "description": "Number of days to forecast (default: 3)",
                        "minimum": 1,
                        "maximum": 16
                    }
                },
                "required": ["location"],
                "additionalProperties": false
            }),
        }
    }
}

#[async_trait]
impl ToolHandler for GetForecastHandler {
    #[inline]
    async fn invoke(&self, arguments: Map<String, Value>) -> Result<Value> {
        let location = arguments
            .get("location")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow!("Missing required parameter: location"))?;

        let days = arguments.get("days").map_or(Ok(3), |value| {
            value
                .as_u64()
                .and_then(|days| u32::try_from(days).ok())
                .ok_or_else(|| anyhow!("Parameter 'days' must be a positive integer"))
        })?;

        debug!("Building {}-day forecast for '{}'", days, location);

        let forecast = self.provider.forecast(location, days);
        Ok(json!({
            "location": location,
            "forecast": forecast
        }))
    }
}
