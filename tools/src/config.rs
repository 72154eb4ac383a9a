//! Endpoint and client configuration for the tool layer
//!
//! Every upstream URL is configurable so deployments can point at mirrors
//! and tests can point at a local mock server.

use std::time::Duration;
use thiserror::Error;

/// Default weather-by-text endpoint
pub const DEFAULT_WEATHER_URL: &str = "https://wttr.in";
/// Default search aggregator (HTML lite endpoint)
pub const DEFAULT_SEARCH_URL: &str = "https://html.duckduckgo.com/html/";
/// Default translation endpoint
pub const DEFAULT_TRANSLATE_URL: &str = "https://api.mymemory.translated.net/get";
/// Default encyclopedia API endpoint
pub const DEFAULT_WIKIPEDIA_URL: &str = "https://en.wikipedia.org/w/api.php";
/// Default joke endpoint
pub const DEFAULT_JOKE_URL: &str = "https://official-joke-api.appspot.com/random_joke";

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Environment variable holds a value that does not parse
    #[error("Invalid value for {key}: {value:?}")]
    Invalid {
        /// Environment variable name
        key: String,
        /// Raw value found
        value: String,
    },
}

/// Tool layer configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolsConfig {
    /// Weather-by-text base URL; the location is appended as a path segment
    pub weather_url: String,
    /// Search aggregator URL
    pub search_url: String,
    /// Translation API URL
    pub translate_url: String,
    /// Encyclopedia API URL
    pub wikipedia_url: String,
    /// Joke API URL
    pub joke_url: String,
    /// Per-request timeout applied by the HTTP client
    pub timeout: Duration,
    /// User agent sent with every request
    pub user_agent: String,
    /// Sentences requested for encyclopedia summaries
    pub summary_sentences: u32,
    /// Result snippets aggregated into one search answer
    pub max_search_results: usize,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            weather_url: DEFAULT_WEATHER_URL.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            translate_url: DEFAULT_TRANSLATE_URL.to_string(),
            wikipedia_url: DEFAULT_WIKIPEDIA_URL.to_string(),
            joke_url: DEFAULT_JOKE_URL.to_string(),
            timeout: Duration::from_secs(10),
            user_agent: format!("voice-agent-tools/{}", env!("CARGO_PKG_VERSION")),
            summary_sentences: 3,
            max_search_results: 5,
        }
    }
}

impl ToolsConfig {
    /// Load configuration from `VOICE_TOOLS_*` environment variables
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if a numeric variable does not parse
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if a numeric variable does not parse
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("VOICE_TOOLS_WEATHER_URL") {
            config.weather_url = url;
        }
        if let Some(url) = lookup("VOICE_TOOLS_SEARCH_URL") {
            config.search_url = url;
        }
        if let Some(url) = lookup("VOICE_TOOLS_TRANSLATE_URL") {
            config.translate_url = url;
        }
        if let Some(url) = lookup("VOICE_TOOLS_WIKIPEDIA_URL") {
            config.wikipedia_url = url;
        }
        if let Some(url) = lookup("VOICE_TOOLS_JOKE_URL") {
            config.joke_url = url;
        }
        if let Some(agent) = lookup("VOICE_TOOLS_USER_AGENT") {
            config.user_agent = agent;
        }
        if let Some(secs) = parse_var::<u64>(&lookup, "VOICE_TOOLS_TIMEOUT_SECS")? {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(n) = parse_var::<u32>(&lookup, "VOICE_TOOLS_SUMMARY_SENTENCES")? {
            config.summary_sentences = n;
        }
        if let Some(n) = parse_var::<usize>(&lookup, "VOICE_TOOLS_MAX_SEARCH_RESULTS")? {
            config.max_search_results = n;
        }

        Ok(config)
    }

    /// Builder: Set weather URL
    #[must_use]
    pub fn with_weather_url(mut self, url: impl Into<String>) -> Self {
        self.weather_url = url.into();
        self
    }

    /// Builder: Set search URL
    #[must_use]
    pub fn with_search_url(mut self, url: impl Into<String>) -> Self {
        self.search_url = url.into();
        self
    }

    /// Builder: Set translation URL
    #[must_use]
    pub fn with_translate_url(mut self, url: impl Into<String>) -> Self {
        self.translate_url = url.into();
        self
    }

    /// Builder: Set encyclopedia URL
    #[must_use]
    pub fn with_wikipedia_url(mut self, url: impl Into<String>) -> Self {
        self.wikipedia_url = url.into();
        self
    }

    /// Builder: Set joke URL
    #[must_use]
    pub fn with_joke_url(mut self, url: impl Into<String>) -> Self {
        self.joke_url = url.into();
        self
    }

    /// Builder: Set request timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, ConfigError> {
    lookup(key)
        .map(|value| {
            value.trim().parse::<T>().map_err(|_| ConfigError::Invalid {
                key: key.to_string(),
                value,
            })
        })
        .transpose()
}
