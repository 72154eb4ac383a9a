//! Random two-part jokes

use crate::config::ToolsConfig;
use crate::http::{FetchError, HttpClient, parse_endpoint};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use voice_agent_core::agent::{RunContext, Tool, ToolExecutor, ToolExecutorFn, ToolResult};

/// Registered tool name
pub const NAME: &str = "get_random_joke";

#[derive(Debug, Deserialize)]
struct Joke {
    setup: String,
    punchline: String,
}

/// Joke tool
#[derive(Clone, Debug)]
pub struct JokeTool {
    http: HttpClient,
    url: String,
}

impl JokeTool {
    /// Create the tool against a joke endpoint
    #[must_use]
    pub fn new(http: HttpClient, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    /// Fetch a joke as `"{setup} - {punchline}"`
    pub async fn get_random_joke(&self) -> String {
        match self.fetch().await {
            Ok(joke) => {
                tracing::info!(setup = %joke.setup, "Joke retrieved");
                format!("{} - {}", joke.setup, joke.punchline)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching joke");
                "Sorry, I couldn't fetch a joke right now.".to_string()
            }
        }
    }

    async fn fetch(&self) -> Result<Joke, FetchError> {
        let url = parse_endpoint(&self.url)?;
        self.http.send(self.http.get(url)).await?.error_for_status()?.json()
    }
}

#[async_trait::async_trait]
impl ToolExecutor for JokeTool {
    async fn execute(&self, _ctx: &RunContext, _input: &str) -> ToolResult {
        // No arguments; anything the model sends is ignored
        Ok(self.get_random_joke().await)
    }
}

/// Tool definition for `get_random_joke`
#[must_use]
pub fn definition() -> Tool {
    Tool {
        name: NAME.to_string(),
        description: "Tell a random joke.".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {}
        }),
    }
}

/// Create the `get_random_joke` tool
#[must_use]
pub fn get_random_joke_tool(http: HttpClient, config: &ToolsConfig) -> (Tool, ToolExecutorFn) {
    let executor = JokeTool::new(http, config.joke_url.clone());
    (definition(), Arc::new(executor))
}
