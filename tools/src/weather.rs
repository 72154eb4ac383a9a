//! Weather lookup via a weather-by-text service

use crate::config::ToolsConfig;
use crate::http::{FetchError, HttpClient, HttpResponse, parse_endpoint};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use voice_agent_core::agent::{
    RunContext, Tool, ToolError, ToolExecutor, ToolExecutorFn, ToolResult,
};

/// Registered tool name
pub const NAME: &str = "get_weather";

#[derive(Debug, Deserialize)]
struct WeatherArgs {
    location: String,
}

/// Current-weather tool
///
/// Asks the service for its one-line format (`?format=3`) and returns the
/// line as is, e.g. `London: ☀️ +18°C`.
#[derive(Clone, Debug)]
pub struct WeatherTool {
    http: HttpClient,
    base_url: String,
}

impl WeatherTool {
    /// Create the tool against a weather-by-text base URL
    #[must_use]
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Look up the current weather for `location`
    pub async fn get_weather(&self, location: &str) -> String {
        match self.fetch(location).await {
            Ok(response) if response.status == StatusCode::OK => {
                let report = response.body.trim();
                tracing::info!(location, report, "Weather retrieved");
                report.to_string()
            }
            Ok(response) => {
                tracing::warn!(
                    location,
                    status = response.status.as_u16(),
                    "Weather lookup failed"
                );
                format!("Could not retrieve weather data for {location}.")
            }
            Err(e) => {
                tracing::error!(location, error = %e, "Error fetching weather data");
                format!("An error occurred while retrieving weather data for {location}.")
            }
        }
    }

    async fn fetch(&self, location: &str) -> Result<HttpResponse, FetchError> {
        let mut url = parse_endpoint(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|()| FetchError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .push(location);
        url.query_pairs_mut().append_pair("format", "3");

        self.http.send(self.http.get(url)).await
    }
}

#[async_trait::async_trait]
impl ToolExecutor for WeatherTool {
    async fn execute(&self, _ctx: &RunContext, input: &str) -> ToolResult {
        let args: WeatherArgs =
            serde_json::from_str(input).map_err(|e| ToolError::invalid_arguments(NAME, &e))?;
        Ok(self.get_weather(&args.location).await)
    }
}

/// Tool definition for `get_weather`
#[must_use]
pub fn definition() -> Tool {
    Tool {
        name: NAME.to_string(),
        description: "Get the current weather for a given location.".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "location": {
                    "type": "string",
                    "description": "City or place name, e.g. 'London' or 'San Francisco'"
                }
            },
            "required": ["location"]
        }),
    }
}

/// Create the `get_weather` tool
#[must_use]
pub fn get_weather_tool(http: HttpClient, config: &ToolsConfig) -> (Tool, ToolExecutorFn) {
    let executor = WeatherTool::new(http, config.weather_url.clone());
    (definition(), Arc::new(executor))
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn tool_for(server: &MockServer) -> WeatherTool {
        let config = ToolsConfig::default().with_timeout(Duration::from_millis(300));
        let http = HttpClient::new(&config).expect("client builds");
        WeatherTool::new(http, server.uri())
    }

    #[test]
    fn test_weather_tool_schema() {
        let tool = definition();
        assert_eq!(tool.name, "get_weather");
        assert_eq!(tool.input_schema["required"][0], "location");
    }

    #[tokio::test]
    async fn test_weather_returns_trimmed_line() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/London"))
            .and(query_param("format", "3"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("  Weather in London: ☀️ +18°C\n"),
            )
            .mount(&server)
            .await;

        let text = tool_for(&server).get_weather("London").await;
        assert_eq!(text, "Weather in London: ☀️ +18°C");
    }

    #[tokio::test]
    async fn test_weather_non_200() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let text = tool_for(&server).get_weather("Atlantis").await;
        assert_eq!(text, "Could not retrieve weather data for Atlantis.");
    }

    #[tokio::test]
    async fn test_weather_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("late")
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let text = tool_for(&server).get_weather("Paris").await;
        assert_eq!(
            text,
            "An error occurred while retrieving weather data for Paris."
        );
    }

    #[tokio::test]
    async fn test_weather_executor_validates_arguments() {
        let server = MockServer::start().await;
        let tool = tool_for(&server);
        let ctx = RunContext::new("test");

        let result = tool.execute(&ctx, r#"{"location": 42}"#).await;
        assert!(matches!(result, Err(ToolError::InvalidArguments { .. })));
    }
}
