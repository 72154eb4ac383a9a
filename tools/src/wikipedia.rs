//! Encyclopedia summaries via the MediaWiki action API
//!
//! A summary lookup has three outcomes besides success, and each gets its
//! own sentence:
//! - **Not found**: no page matches, even after spelling suggestions
//! - **Disambiguation**: the best match is a list of other topics
//! - **Request failure**: the API could not be reached or decoded

use crate::http::{FetchError, HttpClient, parse_endpoint};
use scraper::{Html, Selector};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::{Arc, LazyLock};
use thiserror::Error;
use voice_agent_core::agent::{
    RunContext, Tool, ToolError, ToolExecutor, ToolExecutorFn, ToolResult,
};

/// Registered tool name
pub const NAME: &str = "wikipedia_summary";

/// Candidates listed back to the user on disambiguation
const MAX_SUGGESTIONS: usize = 3;

#[allow(clippy::expect_used)] // Literal selector
static LIST_ITEM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li").expect("valid list item selector"));

#[allow(clippy::expect_used)] // Literal selector
static LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("valid link selector"));

/// Encyclopedia lookup failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncyclopediaError {
    /// No page matches the query
    #[error("No page found for {0:?}")]
    PageNotFound(String),

    /// Query matches several topics
    #[error("Ambiguous query, {} candidate topics", .0.len())]
    Disambiguation(Vec<String>),

    /// API unreachable or response undecodable
    #[error(transparent)]
    Request(#[from] FetchError),
}

/// Encyclopedia backend
#[async_trait::async_trait]
pub trait EncyclopediaProvider: Send + Sync {
    /// Summary of the best-matching topic, limited to `sentences` sentences
    ///
    /// # Errors
    ///
    /// Returns `EncyclopediaError::PageNotFound` or
    /// `EncyclopediaError::Disambiguation` for lookups that resolve to no single
    /// page, `EncyclopediaError::Request` if the backend fails
    async fn summary(&self, query: &str, sentences: u32) -> Result<String, EncyclopediaError>;
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    #[serde(default)]
    query: Option<T>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    searchinfo: Option<SearchInfo>,
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchInfo {
    #[serde(default)]
    suggestion: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

#[derive(Debug, Default, Deserialize)]
struct PagesQuery {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    extract: Option<String>,
    #[serde(default)]
    pageprops: Option<PageProps>,
}

#[derive(Debug, Deserialize)]
struct PageProps {
    #[serde(default)]
    disambiguation: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ParseResponse {
    #[serde(default)]
    parse: Option<ParsedPage>,
}

#[derive(Debug, Deserialize)]
struct ParsedPage {
    #[serde(default)]
    text: String,
}

/// Wikipedia through the MediaWiki action API
#[derive(Clone, Debug)]
pub struct Wikipedia {
    http: HttpClient,
    url: String,
}

impl Wikipedia {
    /// Create a provider against a MediaWiki `api.php` endpoint
    #[must_use]
    pub fn new(http: HttpClient, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    async fn api<T: DeserializeOwned>(
        &self,
        action: &str,
        params: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        let url = parse_endpoint(&self.url)?;
        let request = self
            .http
            .get(url)
            .query(&[("action", action), ("format", "json"), ("formatversion", "2")])
            .query(params);

        self.http.send(request).await?.error_for_status()?.json()
    }

    async fn query<T>(&self, params: &[(&str, &str)]) -> Result<T, FetchError>
    where
        T: DeserializeOwned + Default,
    {
        let body: ApiResponse<T> = self.api("query", params).await?;
        Ok(body.query.unwrap_or_default())
    }

    /// Resolve near-miss spellings to a page title
    ///
    /// A spelling suggestion wins over the top hit.
    async fn resolve_title(&self, query: &str) -> Result<String, EncyclopediaError> {
        let found: SearchQuery = self
            .query(&[
                ("list", "search"),
                ("srsearch", query),
                ("srinfo", "suggestion"),
                ("srprop", ""),
                ("srlimit", "1"),
            ])
            .await?;

        found
            .searchinfo
            .and_then(|info| info.suggestion)
            .filter(|suggestion| !suggestion.is_empty())
            .or_else(|| found.search.into_iter().next().map(|hit| hit.title))
            .ok_or_else(|| EncyclopediaError::PageNotFound(query.to_string()))
    }

    /// Entries of a disambiguation page, in page order
    async fn disambiguation_options(
        &self,
        title: &str,
    ) -> Result<Vec<String>, EncyclopediaError> {
        let found: ParseResponse = self
            .api("parse", &[("page", title), ("prop", "text"), ("redirects", "1")])
            .await?;

        Ok(found
            .parse
            .map(|page| list_entries(&page.text))
            .unwrap_or_default())
    }
}

/// Text of the first link in each list item, skipping table-of-contents rows
fn list_entries(html: &str) -> Vec<String> {
    let fragment = Html::parse_fragment(html);

    fragment
        .select(&LIST_ITEM)
        .filter(|item| !item.value().classes().any(|class| class.contains("tocsection")))
        .filter_map(|item| item.select(&LINK).next())
        .map(|link| {
            link.text()
                .flat_map(str::split_whitespace)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|entry| !entry.is_empty())
        .collect()
}

#[async_trait::async_trait]
impl EncyclopediaProvider for Wikipedia {
    async fn summary(&self, query: &str, sentences: u32) -> Result<String, EncyclopediaError> {
        let title = self.resolve_title(query).await?;
        let sentences = sentences.to_string();

        let found: PagesQuery = self
            .query(&[
                ("prop", "extracts|pageprops"),
                ("ppprop", "disambiguation"),
                ("titles", title.as_str()),
                ("exsentences", sentences.as_str()),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("redirects", "1"),
            ])
            .await?;

        let page = found
            .pages
            .into_iter()
            .next()
            .filter(|page| !page.missing)
            .ok_or_else(|| EncyclopediaError::PageNotFound(title.clone()))?;

        if page
            .pageprops
            .as_ref()
            .is_some_and(|props| props.disambiguation.is_some())
        {
            let options = self.disambiguation_options(&title).await?;
            return Err(EncyclopediaError::Disambiguation(options));
        }

        page.extract
            .map(|extract| extract.trim().to_string())
            .filter(|extract| !extract.is_empty())
            .ok_or(EncyclopediaError::PageNotFound(title))
    }
}

#[derive(Debug, Deserialize)]
struct WikipediaArgs {
    query: String,
}

/// Encyclopedia summary tool
#[derive(Clone)]
pub struct WikipediaTool {
    provider: Arc<dyn EncyclopediaProvider>,
    sentences: u32,
}

impl WikipediaTool {
    /// Create the tool over an encyclopedia provider
    #[must_use]
    pub fn new(provider: Arc<dyn EncyclopediaProvider>, sentences: u32) -> Self {
        Self {
            provider,
            sentences,
        }
    }

    /// Short summary of the topic best matching `query`
    pub async fn wikipedia_summary(&self, query: &str) -> String {
        match self.provider.summary(query, self.sentences).await {
            Ok(summary) => {
                tracing::info!(query, "Wikipedia summary retrieved");
                summary
            }
            Err(EncyclopediaError::PageNotFound(_)) => {
                tracing::warn!(query, "No Wikipedia page found");
                format!("Sorry, I couldn't find a Wikipedia page for '{query}'.")
            }
            Err(EncyclopediaError::Disambiguation(options)) => {
                tracing::warn!(query, candidates = options.len(), "Ambiguous Wikipedia query");
                disambiguation_message(query, &options)
            }
            Err(EncyclopediaError::Request(e)) => {
                tracing::error!(query, error = %e, "Error fetching Wikipedia summary");
                "An error occurred while fetching the Wikipedia summary.".to_string()
            }
        }
    }
}

fn disambiguation_message(query: &str, options: &[String]) -> String {
    if options.is_empty() {
        return format!("Your query '{query}' is ambiguous. Please be more specific.");
    }

    let suggestions = options
        .iter()
        .take(MAX_SUGGESTIONS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    format!("Your query '{query}' is ambiguous. Did you mean: {suggestions}?")
}

#[async_trait::async_trait]
impl ToolExecutor for WikipediaTool {
    async fn execute(&self, _ctx: &RunContext, input: &str) -> ToolResult {
        let args: WikipediaArgs =
            serde_json::from_str(input).map_err(|e| ToolError::invalid_arguments(NAME, &e))?;
        Ok(self.wikipedia_summary(&args.query).await)
    }
}

/// Tool definition for `wikipedia_summary`
#[must_use]
pub fn definition() -> Tool {
    Tool {
        name: NAME.to_string(),
        description: "Get a short Wikipedia summary (3 sentences) for a topic.".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Topic to look up, e.g. 'Alan Turing'"
                }
            },
            "required": ["query"]
        }),
    }
}

/// Create the `wikipedia_summary` tool over an encyclopedia provider
#[must_use]
pub fn wikipedia_summary_tool(
    provider: Arc<dyn EncyclopediaProvider>,
    sentences: u32,
) -> (Tool, ToolExecutorFn) {
    (definition(), Arc::new(WikipediaTool::new(provider, sentences)))
}
