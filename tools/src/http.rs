//! Shared HTTP client for outbound tool requests
//!
//! Every tool makes at most one request per call through [`HttpClient`].
//! The client reports failures as [`FetchError`] values so each tool can
//! pick the sentence it speaks for that failure:
//! - `Status`: the upstream answered with a non-success code
//! - `Transport`: connection refused, DNS failure, timeout
//! - `Decode`: the body was not the shape we expected

use crate::config::ToolsConfig;
use futures::StreamExt;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Maximum response size (5MB)
const MAX_RESPONSE_SIZE: usize = 5 * 1024 * 1024;

/// Outbound request failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Upstream returned a non-success status
    #[error("Upstream returned status {0}")]
    Status(u16),

    /// Request never completed (connect, DNS, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// Body did not decode into the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Body exceeded the size cap
    #[error("Response too large (>{0} bytes)")]
    TooLarge(usize),

    /// Configured URL could not be used
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Buffered response: status plus body text
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response body (lossy UTF-8)
    pub body: String,
}

impl HttpResponse {
    /// Whether the status is 2xx
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Turn a non-success status into `FetchError::Status`
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Status` if the status is not 2xx
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(FetchError::Status(self.status.as_u16()))
        }
    }

    /// Decode the body as JSON
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Decode` if the body is not valid JSON for `T`
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_str(&self.body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

/// Cheaply clonable HTTP client shared by all tools of a registry
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Build a client with the configured timeout and user agent
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Transport` if the TLS backend cannot be initialised
    pub fn new(config: &ToolsConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| FetchError::Transport(format!("failed to build http client: {e}")))?;

        Ok(Self { client })
    }

    /// Start a GET request
    #[must_use]
    pub fn get(&self, url: reqwest::Url) -> RequestBuilder {
        self.client.get(url)
    }

    /// Start a POST request
    #[must_use]
    pub fn post(&self, url: reqwest::Url) -> RequestBuilder {
        self.client.post(url)
    }

    /// Send a request and buffer its body
    ///
    /// Non-success statuses are returned as responses, not errors, so callers
    /// can tell "upstream said no" apart from "upstream unreachable".
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Transport` if the request or body read fails,
    /// `FetchError::TooLarge` if the body exceeds the size cap
    pub async fn send(&self, request: RequestBuilder) -> Result<HttpResponse, FetchError> {
        let response = request
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();

        // Stream response with size limit
        let mut body_bytes = Vec::new();
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk
                .map_err(|e| FetchError::Transport(format!("Failed to read response: {e}")))?;

            if body_bytes.len() + chunk.len() > MAX_RESPONSE_SIZE {
                return Err(FetchError::TooLarge(MAX_RESPONSE_SIZE));
            }

            body_bytes.extend_from_slice(&chunk);
        }

        Ok(HttpResponse {
            status,
            body: String::from_utf8_lossy(&body_bytes).into_owned(),
        })
    }
}

/// Parse a configured endpoint URL
///
/// # Errors
///
/// Returns `FetchError::InvalidUrl` if `raw` is not an absolute http(s) URL
pub fn parse_endpoint(raw: &str) -> Result<reqwest::Url, FetchError> {
    let url = reqwest::Url::parse(raw).map_err(|e| FetchError::InvalidUrl(format!("{raw}: {e}")))?;

    // Security: Only allow http:// and https://
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(FetchError::InvalidUrl(format!(
            "{raw}: URL must start with http:// or https://"
        )));
    }

    Ok(url)
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Deserialize)]
    struct Payload {
        value: u32,
    }

    fn client() -> HttpClient {
        HttpClient::new(&ToolsConfig::default()).expect("client builds")
    }

    #[test]
    fn test_parse_endpoint_rejects_other_schemes() {
        assert!(parse_endpoint("https://wttr.in").is_ok());
        assert!(matches!(
            parse_endpoint("file:///etc/passwd"),
            Err(FetchError::InvalidUrl(_))
        ));
        assert!(matches!(
            parse_endpoint("not a url"),
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_send_keeps_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string("nope"))
            .mount(&server)
            .await;

        let url = parse_endpoint(&format!("{}/missing", server.uri())).expect("valid url");
        let client = client();
        let response = client.send(client.get(url)).await.expect("request completes");

        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.body, "nope");
        assert_eq!(response.error_for_status().err(), Some(FetchError::Status(404)));
    }

    #[tokio::test]
    async fn test_json_decoding() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"value": 7}"#))
            .mount(&server)
            .await;

        let url = parse_endpoint(&server.uri()).expect("valid url");
        let client = client();
        let response = client.send(client.get(url)).await.expect("request completes");

        let payload: Payload = response.json().expect("valid json");
        assert_eq!(payload.value, 7);

        let bad = HttpResponse {
            status: StatusCode::OK,
            body: "<html>".to_string(),
        };
        assert!(matches!(bad.json::<Payload>(), Err(FetchError::Decode(_))));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Port 9 (discard) is not served by the mock framework
        let url = parse_endpoint("http://127.0.0.1:9/").expect("valid url");
        let client = client();
        let result = client.send(client.get(url)).await;
        assert!(matches!(result, Err(FetchError::Transport(_))));
    }
}
