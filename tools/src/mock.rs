//! Canned providers for testing and offline demos
//!
//! These stand in for the search aggregator and the encyclopedia when:
//! - Testing tool behavior without network access
//! - Running the demo console with `--offline`

use crate::http::FetchError;
use crate::search::SearchProvider;
use crate::wikipedia::{EncyclopediaError, EncyclopediaProvider};

/// Search provider with a fixed outcome
#[derive(Clone, Debug)]
pub struct StaticSearch {
    outcome: Result<String, FetchError>,
}

impl StaticSearch {
    /// Always answer with `text` (empty text means no results)
    #[must_use]
    pub fn results(text: impl Into<String>) -> Self {
        Self {
            outcome: Ok(text.into()),
        }
    }

    /// Always fail as if the aggregator were unreachable
    #[must_use]
    pub fn failing() -> Self {
        Self {
            outcome: Err(FetchError::Transport("search backend offline".to_string())),
        }
    }
}

#[async_trait::async_trait]
impl SearchProvider for StaticSearch {
    async fn search(&self, _query: &str) -> Result<String, FetchError> {
        self.outcome.clone()
    }
}

/// Encyclopedia provider with a fixed outcome
#[derive(Clone, Debug)]
pub struct StaticEncyclopedia {
    outcome: Result<String, EncyclopediaError>,
}

impl StaticEncyclopedia {
    /// Always answer with `text`
    #[must_use]
    pub fn summary(text: impl Into<String>) -> Self {
        Self {
            outcome: Ok(text.into()),
        }
    }

    /// Never find a page
    #[must_use]
    pub fn not_found() -> Self {
        Self {
            outcome: Err(EncyclopediaError::PageNotFound(String::new())),
        }
    }

    /// Always report the given candidate topics
    #[must_use]
    pub fn ambiguous(options: &[&str]) -> Self {
        Self {
            outcome: Err(EncyclopediaError::Disambiguation(
                options.iter().map(ToString::to_string).collect(),
            )),
        }
    }

    /// Always fail as if the API were unreachable
    #[must_use]
    pub fn failing() -> Self {
        Self {
            outcome: Err(EncyclopediaError::Request(FetchError::Transport(
                "encyclopedia offline".to_string(),
            ))),
        }
    }
}

#[async_trait::async_trait]
impl EncyclopediaProvider for StaticEncyclopedia {
    async fn summary(&self, query: &str, _sentences: u32) -> Result<String, EncyclopediaError> {
        match &self.outcome {
            Err(EncyclopediaError::PageNotFound(_)) => {
                Err(EncyclopediaError::PageNotFound(query.to_string()))
            }
            other => other.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_search_is_repeatable() {
        let provider = StaticSearch::results("same answer");
        assert_eq!(provider.search("a").await, provider.search("b").await);
    }

    #[tokio::test]
    async fn test_static_encyclopedia_names_query() {
        let provider = StaticEncyclopedia::not_found();
        assert_eq!(
            provider.summary("Atlantis", 3).await,
            Err(EncyclopediaError::PageNotFound("Atlantis".to_string()))
        );
    }
}
