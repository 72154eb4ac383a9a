//! Text translation via the MyMemory translation API
//!
//! See <https://mymemory.translated.net/doc/spec.php>.

use crate::config::ToolsConfig;
use crate::http::{FetchError, HttpClient, HttpResponse, parse_endpoint};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use voice_agent_core::agent::{
    RunContext, Tool, ToolError, ToolExecutor, ToolExecutorFn, ToolResult,
};

/// Registered tool name
pub const NAME: &str = "translate_text";

/// Source language used when the caller gives none
pub const DEFAULT_SOURCE_LANGUAGE: &str = "en";

fn default_source_language() -> String {
    DEFAULT_SOURCE_LANGUAGE.to_string()
}

#[derive(Debug, Deserialize)]
struct TranslateArgs {
    text: String,
    target_language: String,
    #[serde(default = "default_source_language")]
    source_language: String,
}

#[derive(Debug, Deserialize)]
struct TranslationResponse {
    #[serde(rename = "responseData", default)]
    response_data: Option<ResponseData>,
    #[serde(rename = "responseDetails", default)]
    response_details: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    #[serde(rename = "translatedText", default)]
    translated_text: Option<String>,
}

impl TranslationResponse {
    fn translated_text(&self) -> Option<&str> {
        self.response_data
            .as_ref()
            .and_then(|data| data.translated_text.as_deref())
            .filter(|text| !text.is_empty())
    }

    fn details(&self) -> String {
        match &self.response_details {
            None | Some(serde_json::Value::Null) => "No details provided.".to_string(),
            Some(serde_json::Value::String(details)) => details.clone(),
            Some(other) => other.to_string(),
        }
    }
}

/// Translation tool
#[derive(Clone, Debug)]
pub struct TranslateTool {
    http: HttpClient,
    url: String,
}

impl TranslateTool {
    /// Create the tool against a translation endpoint
    #[must_use]
    pub fn new(http: HttpClient, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    /// Translate `text` from `source_language` into `target_language`
    pub async fn translate_text(
        &self,
        text: &str,
        target_language: &str,
        source_language: &str,
    ) -> String {
        tracing::info!(text, source_language, target_language, "Attempting to translate");

        let response = match self.fetch(text, target_language, source_language).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, "Error calling translation API");
                return "An error occurred while communicating with the translation service."
                    .to_string();
            }
        };

        let data: TranslationResponse = match response.json() {
            Ok(data) => data,
            Err(e) => {
                tracing::error!(error = %e, "Unexpected translation response");
                return "An unexpected error occurred.".to_string();
            }
        };

        if let Some(translated) = data.translated_text() {
            tracing::info!(translated, "Translation successful");
            return translated.to_string();
        }

        let details = data.details();
        tracing::warn!(details = %details, "Translation API did not return a valid translation");
        format!("Could not translate the text. API response: {details}")
    }

    async fn fetch(
        &self,
        text: &str,
        target_language: &str,
        source_language: &str,
    ) -> Result<HttpResponse, FetchError> {
        let url = parse_endpoint(&self.url)?;
        let langpair = format!("{source_language}|{target_language}");
        let request = self
            .http
            .get(url)
            .query(&[("q", text), ("langpair", langpair.as_str())]);

        self.http.send(request).await?.error_for_status()
    }
}

#[async_trait::async_trait]
impl ToolExecutor for TranslateTool {
    async fn execute(&self, _ctx: &RunContext, input: &str) -> ToolResult {
        let args: TranslateArgs =
            serde_json::from_str(input).map_err(|e| ToolError::invalid_arguments(NAME, &e))?;
        Ok(self
            .translate_text(&args.text, &args.target_language, &args.source_language)
            .await)
    }
}

/// Tool definition for `translate_text`
#[must_use]
pub fn definition() -> Tool {
    Tool {
        name: NAME.to_string(),
        description: "Translates a given text from a source language to a target language."
            .to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "text": {
                    "type": "string",
                    "description": "The text to be translated."
                },
                "target_language": {
                    "type": "string",
                    "description": "The language to translate the text into \
                                    (e.g., 'es' for Spanish, 'fr' for French)."
                },
                "source_language": {
                    "type": "string",
                    "description": "The language of the original text \
                                    (e.g., 'en' for English). Defaults to 'en'.",
                    "default": DEFAULT_SOURCE_LANGUAGE
                }
            },
            "required": ["text", "target_language"]
        }),
    }
}

/// Create the `translate_text` tool
#[must_use]
pub fn translate_text_tool(http: HttpClient, config: &ToolsConfig) -> (Tool, ToolExecutorFn) {
    let executor = TranslateTool::new(http, config.translate_url.clone());
    (definition(), Arc::new(executor))
}
