//! Weather Data Provider
//!
//! The external collaborator behind the sample tools: an injectable data
//! source, implemented here as a static lookup table seeded with a few
//! cities and extendable through configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::WeatherConfig;


/// Current conditions for a location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub temperature: i64,
    pub condition: String,
    pub humidity: i64,
}

/// One day in a forecast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub day: u32,
    pub temperature: i64,
    pub condition: String,
}

/// Injectable weather data source
pub trait WeatherProvider: Send + Sync {
    /// Current conditions; unknown locations receive the fallback observation
    fn current(&self, location: &str) -> Observation;

    /// Daily forecast starting at day 1
    fn forecast(&self, location: &str, days: u32) -> Vec<ForecastDay>;
}

/// Lookup-table provider
pub struct StaticWeatherProvider {
    entries: HashMap<String, Observation>,
    fallback: Observation,
}

impl StaticWeatherProvider {
    /// Provider seeded with the built-in lookup table
    #[inline]
    pub fn builtin() -> Self {
        let mut entries = HashMap::new();
        entries.insert(
            "Beijing".to_string(),
            Observation {
                temperature: 25,
                condition: "clear".to_string(),
                humidity: 45,
            },
        );
        entries.insert(
            "Shanghai".to_string(),
            Observation {
                temperature: 28,
                condition: "cloudy".to_string(),
                humidity: 60,
            },
        );
        entries.insert(
            "Guangzhou".to_string(),
            Observation {
                temperature: 32,
                condition: "light rain".to_string(),
                humidity: 75,
            },
        );

        Self {
            entries,
            fallback: Observation {
                temperature: 22,
                condition: "clear".to_string(),
                humidity: 50,
            },
        }
    }

    /// Built-in table with the configured fallback and extra entries
    /// layered on top
    #[inline]
    pub fn from_config(config: &WeatherConfig) -> Self {
        let mut provider = Self::builtin();
        provider.fallback = config.fallback.clone();
        for (location, observation) in &config.locations {
            provider
                .entries
                .insert(location.clone(), observation.clone());
        }
        provider
    }
}

impl Default for StaticWeatherProvider {
    #[inline]
    fn default() -> Self {
        Self::builtin()
    }
}

impl WeatherProvider for StaticWeatherProvider {
    #[inline]
    fn current(&self, location: &str) -> Observation {
        self.entries
            .get(location)
            .cloned()
            .unwrap_or_else(|| self.fallback.clone())
    }

    #[inline]
    fn forecast(&self, _location: &str, days: u32) -> Vec<ForecastDay> {
        (1..=days)
            .map(|day| ForecastDay {
                day,
                temperature: 20 + 2 * (i64::from(day) - 1),
                condition: if day % 2 == 1 { "clear" } else { "cloudy" }.to_string(),
            })
            .collect()
    }
}
