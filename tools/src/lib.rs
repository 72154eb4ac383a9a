//! Tools for the voice agent
//!
//! This crate provides the tools a hosted voice-agent session may call
//! mid-conversation, and the registry the session uses to find them.
//!
//! ## Design Principles
//!
//! **Text in, text out**: every tool answers with a sentence the agent can
//! speak. Upstream failures (error statuses, timeouts, malformed bodies,
//! ambiguous lookups) become apologetic or explanatory sentences:
//! - The only typed error is `ToolError`, raised before a tool runs
//! - One outbound request per call, no retries
//! - No state shared between calls beyond an immutable HTTP client
//!
//! ## Modules
//!
//! - `weather`: Current weather (`get_weather`)
//! - `search`: Web search (`search_web`) and the `SearchProvider` seam
//! - `translate`: Translation (`translate_text`)
//! - `wikipedia`: Encyclopedia summaries (`wikipedia_summary`) and the
//!   `EncyclopediaProvider` seam
//! - `joke`: Random jokes (`get_random_joke`)
//! - `calculation`: Arithmetic (`calculate`)
//! - `registry`: Tool registry for dispatch by name
//! - `http`: Shared HTTP client and `FetchError`
//! - `config`: Endpoint and client configuration
//! - `mock`: Canned providers for tests and offline use

pub mod calculation;
pub mod config;
pub mod http;
pub mod joke;
pub mod mock;
pub mod registry;
pub mod search;
pub mod translate;
pub mod weather;
pub mod wikipedia;

pub use voice_agent_core::agent::{RunContext, Tool, ToolError, ToolExecutorFn, ToolResult};

// Re-export commonly used types
pub use config::{ConfigError, ToolsConfig};
pub use http::{FetchError, HttpClient};
pub use registry::ToolRegistry;
pub use search::SearchProvider;
pub use wikipedia::EncyclopediaProvider;

use std::sync::Arc;

/// Create a registry with all tools using live providers
///
/// # Errors
///
/// Returns `FetchError` if the HTTP client cannot be built
pub fn default_registry(config: &ToolsConfig) -> Result<ToolRegistry, FetchError> {
    let http = HttpClient::new(config)?;
    let search = Arc::new(search::DuckDuckGo::new(
        http.clone(),
        config.search_url.clone(),
        config.max_search_results,
    ));
    let encyclopedia = Arc::new(wikipedia::Wikipedia::new(
        http.clone(),
        config.wikipedia_url.clone(),
    ));

    Ok(registry_with(&http, config, search, encyclopedia))
}

/// Create a registry with all tools over the given search and encyclopedia
/// providers
#[must_use]
pub fn registry_with(
    http: &HttpClient,
    config: &ToolsConfig,
    search: Arc<dyn SearchProvider>,
    encyclopedia: Arc<dyn EncyclopediaProvider>,
) -> ToolRegistry {
    let mut registry = ToolRegistry::new();

    let (tool, executor) = weather::get_weather_tool(http.clone(), config);
    registry.register(tool, executor);

    let (tool, executor) = search::search_web_tool(search);
    registry.register(tool, executor);

    let (tool, executor) = translate::translate_text_tool(http.clone(), config);
    registry.register(tool, executor);

    let (tool, executor) =
        wikipedia::wikipedia_summary_tool(encyclopedia, config.summary_sentences);
    registry.register(tool, executor);

    let (tool, executor) = joke::get_random_joke_tool(http.clone(), config);
    registry.register(tool, executor);

    let (tool, executor) = calculation::calculate_tool();
    registry.register(tool, executor);

    registry
}
