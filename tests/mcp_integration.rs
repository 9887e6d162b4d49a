#![expect(
    clippy::tests_outside_test_module,
    reason = "integration tests are only compiled in test mode"
)]

//! MCP Server Integration Tests
//!
//! End-to-end tests for the composed weather server: configuration,
//! tool registration, and the full request/response cycle driven over
//! in-memory streams.

use serde_json::Value;
use weather_mcp::commands::build_server;
use weather_mcp::config::Config;
use weather_mcp::weather::Observation;

/// Run one client session against a server built from the given config
async fn run_session(config: &Config, input: &str) -> Vec<Value> {
    let server = build_server(config);
    let mut output = Vec::new();
    server
        .serve(input.as_bytes(), &mut output)
        .await
        .expect("serve loop completes");

    String::from_utf8(output)
        .expect("output is UTF-8")
        .lines()
        .map(|line| serde_json::from_str(line).expect("every output line is valid JSON"))
        .collect()
}

/// Decode the JSON payload embedded in a tools/call content envelope
fn call_payload(response: &Value) -> Value {
    let text = response["result"]["content"][0]["text"]
        .as_str()
        .expect("envelope carries a text payload");
    serde_json::from_str(text).expect("payload is JSON")
}

#[tokio::test]
async fn initialize_reports_configured_identity() {
    let mut config = Config::default();
    config.server.name = "test-weather".to_string();

    let responses = run_session(&config, "{\"id\":1,\"method\":\"initialize\"}\n").await;

    assert_eq!(responses.len(), 1);
    let result = &responses[0]["result"];
    assert_eq!(result["protocolVersion"], "2024-11-05");
    assert_eq!(result["serverInfo"]["name"], "test-weather");
    assert_eq!(result["serverInfo"]["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn lists_both_weather_tools() {
    let config = Config::default();
    let responses = run_session(&config, "{\"id\":1,\"method\":\"tools/list\"}\n").await;

    let tools = responses[0]["result"]["tools"]
        .as_array()
        .expect("tools is an array");
    let names: Vec<&str> = tools
        .iter()
        .map(|tool| tool["name"].as_str().expect("tool has a name"))
        .collect();
    assert_eq!(names, ["get_weather", "get_forecast"]);

    // get_forecast advertises its own schema, days included
    let forecast_schema = &tools[1]["inputSchema"];
    assert!(forecast_schema["properties"]["days"].is_object());
    assert_eq!(forecast_schema["required"], serde_json::json!(["location"]));
}

#[tokio::test]
async fn seeded_city_weather() {
    let config = Config::default();
    let responses = run_session(
        &config,
        "{\"id\":1,\"method\":\"tools/call\",\"params\":{\"name\":\"get_weather\",\"arguments\":{\"location\":\"Beijing\"}}}\n",
    )
    .await;

    assert_eq!(responses[0]["result"]["isError"], false);
    let payload = call_payload(&responses[0]);
    assert_eq!(payload["location"], "Beijing");
    assert_eq!(payload["temperature"], 25);
    assert_eq!(payload["condition"], "clear");
    assert_eq!(payload["humidity"], 45);
    assert_eq!(payload["unit"], "celsius");
}

#[tokio::test]
async fn unknown_city_uses_configured_fallback() {
    let mut config = Config::default();
    config.weather.fallback = Observation {
        temperature: -5,
        condition: "blizzard".to_string(),
        humidity: 95,
    };

    let responses = run_session(
        &config,
        "{\"id\":1,\"method\":\"tools/call\",\"params\":{\"name\":\"get_weather\",\"arguments\":{\"location\":\"Nowhere\"}}}\n",
    )
    .await;

    let payload = call_payload(&responses[0]);
    assert_eq!(payload["location"], "Nowhere");
    assert_eq!(payload["temperature"], -5);
    assert_eq!(payload["condition"], "blizzard");
}

#[tokio::test]
async fn configured_location_visible_over_wire() {
    let mut config = Config::default();
    config.weather.locations.insert(
        "Oslo".to_string(),
        Observation {
            temperature: -3,
            condition: "snow".to_string(),
            humidity: 85,
        },
    );

    let responses = run_session(
        &config,
        "{\"id\":1,\"method\":\"tools/call\",\"params\":{\"name\":\"get_weather\",\"arguments\":{\"location\":\"Oslo\"}}}\n",
    )
    .await;

    let payload = call_payload(&responses[0]);
    assert_eq!(payload["condition"], "snow");
    assert_eq!(payload["temperature"], -3);
}

#[tokio::test]
async fn forecast_defaults_to_three_days() {
    let config = Config::default();
    let responses = run_session(
        &config,
        "{\"id\":1,\"method\":\"tools/call\",\"params\":{\"name\":\"get_forecast\",\"arguments\":{\"location\":\"Shanghai\"}}}\n",
    )
    .await;

    let payload = call_payload(&responses[0]);
    assert_eq!(payload["location"], "Shanghai");
    let forecast = payload["forecast"].as_array().expect("forecast is an array");
    assert_eq!(forecast.len(), 3);
    assert_eq!(forecast[0], serde_json::json!({"day": 1, "temperature": 20, "condition": "clear"}));
    assert_eq!(forecast[1]["temperature"], 22);
    assert_eq!(forecast[1]["condition"], "cloudy");
}

#[tokio::test]
async fn forecast_day_bounds_enforced() {
    let config = Config::default();
    let responses = run_session(
        &config,
        "{\"id\":1,\"method\":\"tools/call\",\"params\":{\"name\":\"get_forecast\",\"arguments\":{\"location\":\"Shanghai\",\"days\":0}}}\n",
    )
    .await;

    assert_eq!(responses[0]["result"]["isError"], true);
    let payload = call_payload(&responses[0]);
    assert!(
        payload["error"]
            .as_str()
            .expect("error is a string")
            .contains("days")
    );
}

#[tokio::test]
async fn full_client_session() {
    let config = Config::default();
    let responses = run_session(
        &config,
        concat!(
            "{\"id\":1,\"method\":\"initialize\",\"params\":{\"protocolVersion\":\"2024-11-05\"}}\n",
            "{\"method\":\"initialized\"}\n",
            "{\"id\":2,\"method\":\"tools/list\"}\n",
            "{\"id\":3,\"method\":\"tools/call\",\"params\":{\"name\":\"get_weather\",\"arguments\":{\"location\":\"Guangzhou\"}}}\n",
            "{\"id\":4,\"method\":\"tools/call\",\"params\":{\"name\":\"nonexistent\"}}\n",
        ),
    )
    .await;

    // The initialized notification produces no output; everything else does,
    // in request order.
    let ids: Vec<i64> = responses
        .iter()
        .map(|r| r["id"].as_i64().expect("numeric id"))
        .collect();
    assert_eq!(ids, [1, 2, 3, 4]);

    let weather = call_payload(&responses[2]);
    assert_eq!(weather["condition"], "light rain");

    assert_eq!(responses[3]["result"]["isError"], true);
    let missing = call_payload(&responses[3]);
    assert_eq!(missing["error"], "Tool 'nonexistent' not found");
}
