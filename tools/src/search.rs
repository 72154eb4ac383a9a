//! Web search via a search aggregator
//!
//! The aggregator is a black box: it answers a query with one blob of text
//! and we relay that blob without re-ranking.

use crate::http::{FetchError, HttpClient, parse_endpoint};
use reqwest::StatusCode;
use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::json;
use std::sync::{Arc, LazyLock};
use voice_agent_core::agent::{
    RunContext, Tool, ToolError, ToolExecutor, ToolExecutorFn, ToolResult,
};

/// Registered tool name
pub const NAME: &str = "search_web";

#[allow(clippy::expect_used)] // Literal selector
static SNIPPET: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a.result__snippet").expect("valid snippet selector"));

/// Search backend returning aggregated result text
///
/// An empty string means the search ran and found nothing.
#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run a search
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if the backend could not be queried
    async fn search(&self, query: &str) -> Result<String, FetchError>;
}

/// DuckDuckGo HTML lite search
///
/// Joins the snippets of the top results with single spaces.
#[derive(Clone, Debug)]
pub struct DuckDuckGo {
    http: HttpClient,
    url: String,
    max_results: usize,
}

impl DuckDuckGo {
    /// Create a provider against the HTML lite endpoint
    #[must_use]
    pub fn new(http: HttpClient, url: impl Into<String>, max_results: usize) -> Self {
        Self {
            http,
            url: url.into(),
            max_results,
        }
    }
}

#[async_trait::async_trait]
impl SearchProvider for DuckDuckGo {
    async fn search(&self, query: &str) -> Result<String, FetchError> {
        let url = parse_endpoint(&self.url)?;
        let request = self.http.post(url).form(&[("q", query), ("b", "")]);
        let response = self.http.send(request).await?.error_for_status()?;
        let snippets = aggregate_snippets(&response.body, self.max_results);

        // Rate limiting answers 202 with a page carrying no results
        if response.status == StatusCode::ACCEPTED && snippets.is_empty() {
            return Err(FetchError::Status(StatusCode::ACCEPTED.as_u16()));
        }

        Ok(snippets)
    }
}

/// Extract up to `max_results` result snippets from an HTML lite page
///
/// Entities are decoded and runs of whitespace collapse to one space.
#[must_use]
pub fn aggregate_snippets(html: &str, max_results: usize) -> String {
    let document = Html::parse_document(html);

    document
        .select(&SNIPPET)
        .map(|snippet| {
            snippet
                .text()
                .flat_map(str::split_whitespace)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|snippet| !snippet.is_empty())
        .take(max_results)
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Deserialize)]
struct SearchArgs {
    query: String,
}

/// Web search tool
#[derive(Clone)]
pub struct SearchTool {
    provider: Arc<dyn SearchProvider>,
}

impl SearchTool {
    /// Create the tool over a search provider
    #[must_use]
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self { provider }
    }

    /// Search the web and return the aggregated result text
    pub async fn search_web(&self, query: &str) -> String {
        match self.provider.search(query).await {
            Ok(results) if !results.trim().is_empty() => {
                tracing::info!(query, results = %results, "Search results");
                results
            }
            Ok(_) => {
                tracing::warn!(query, "No results found");
                "No results found.".to_string()
            }
            Err(e) => {
                tracing::error!(query, error = %e, "Error during web search");
                "An error occurred while searching the web.".to_string()
            }
        }
    }
}

#[async_trait::async_trait]
impl ToolExecutor for SearchTool {
    async fn execute(&self, _ctx: &RunContext, input: &str) -> ToolResult {
        let args: SearchArgs =
            serde_json::from_str(input).map_err(|e| ToolError::invalid_arguments(NAME, &e))?;
        Ok(self.search_web(&args.query).await)
    }
}

/// Tool definition for `search_web`
#[must_use]
pub fn definition() -> Tool {
    Tool {
        name: NAME.to_string(),
        description: "Search the web using DuckDuckGo and return the results.".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search query"
                }
            },
            "required": ["query"]
        }),
    }
}

/// Create the `search_web` tool over a search provider
#[must_use]
pub fn search_web_tool(provider: Arc<dyn SearchProvider>) -> (Tool, ToolExecutorFn) {
    (definition(), Arc::new(SearchTool::new(provider)))
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::ToolsConfig;
    use crate::mock::StaticSearch;
    use wiremock::matchers::{body_string_contains, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const RESULTS_PAGE: &str = r#"
        <div class="result">
          <a class="result__a" href="https://www.rust-lang.org/">Rust</a>
          <a class="result__snippet" href="https://www.rust-lang.org/">
            A language empowering <b>everyone</b>.
          </a>
        </div>
        <div class="result">
          <a class="result__a" href="https://doc.rust-lang.org/book/">The Book</a>
          <a class="result__snippet" href="https://doc.rust-lang.org/book/">
            Learn Rust &amp; have fun.
          </a>
        </div>
    "#;

    #[test]
    fn test_aggregate_snippets() {
        let text = aggregate_snippets(RESULTS_PAGE, 5);
        assert_eq!(text, "A language empowering everyone. Learn Rust & have fun.");
    }

    #[test]
    fn test_aggregate_snippets_respects_limit() {
        let text = aggregate_snippets(RESULTS_PAGE, 1);
        assert_eq!(text, "A language empowering everyone.");
        assert_eq!(aggregate_snippets("<html></html>", 5), "");
    }

    #[tokio::test]
    async fn test_search_returns_provider_text() {
        let tool = SearchTool::new(Arc::new(StaticSearch::results("Rust is fast.")));
        assert_eq!(tool.search_web("rust").await, "Rust is fast.");
    }

    #[tokio::test]
    async fn test_search_empty_results() {
        let tool = SearchTool::new(Arc::new(StaticSearch::results("")));
        assert_eq!(tool.search_web("zzzz").await, "No results found.");
    }

    #[tokio::test]
    async fn test_search_failure() {
        let tool = SearchTool::new(Arc::new(StaticSearch::failing()));
        assert_eq!(
            tool.search_web("rust").await,
            "An error occurred while searching the web."
        );
    }

    #[tokio::test]
    async fn test_duckduckgo_posts_query() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("q=rust+lang"))
            .respond_with(ResponseTemplate::new(200).set_body_string(RESULTS_PAGE))
            .mount(&server)
            .await;

        let http = HttpClient::new(&ToolsConfig::default()).expect("client builds");
        let provider = DuckDuckGo::new(http, server.uri(), 5);
        let text = provider.search("rust lang").await.expect("search succeeds");
        assert!(text.starts_with("A language empowering everyone."));
    }

    #[test]
    fn test_aggregate_snippets_decodes_entities() {
        let html = concat!(
            r#"<a class="result__snippet" href="x">"#,
            "It&#8217;s fast &hellip; and &mdash; safe &#x2F; sound</a>",
        );
        assert_eq!(
            aggregate_snippets(html, 5),
            "It\u{2019}s fast \u{2026} and \u{2014} safe / sound"
        );
    }

    #[tokio::test]
    async fn test_duckduckgo_empty_page() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("<html><body></body></html>"),
            )
            .mount(&server)
            .await;

        let http = HttpClient::new(&ToolsConfig::default()).expect("client builds");
        let provider = DuckDuckGo::new(http, server.uri(), 5);
        assert_eq!(provider.search("rust").await, Ok(String::new()));
    }

    #[tokio::test]
    async fn test_duckduckgo_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(202))
            .mount(&server)
            .await;

        let http = HttpClient::new(&ToolsConfig::default()).expect("client builds");
        let provider = DuckDuckGo::new(http, server.uri(), 5);
        assert_eq!(provider.search("rust").await, Err(FetchError::Status(202)));

        let tool = SearchTool::new(Arc::new(provider));
        assert_eq!(
            tool.search_web("rust").await,
            "An error occurred while searching the web."
        );
    }
}
