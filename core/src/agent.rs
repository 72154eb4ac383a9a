//! Tool-calling types for voice agent sessions
//!
//! A hosted session calls tools mid-conversation. Every call carries:
//! - **Context**: an opaque [`RunContext`] owned by the session driver
//! - **Input**: a JSON object of named arguments
//!
//! and yields plain text. Operations translate their own failures into
//! sentences the agent can speak; the only typed error is [`ToolError`],
//! raised at dispatch before an operation runs.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Tool definition handed to the language-model layer
///
/// The description and the schema's property descriptions steer automatic
/// tool selection, so they must describe exactly what the tool does.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Tool {
    /// Tool name (used to identify which tool to call)
    pub name: String,
    /// Human-readable description of what the tool does
    pub description: String,
    /// JSON schema for the tool's input parameters
    pub input_schema: serde_json::Value,
}

/// Per-conversation handle passed to every tool call
///
/// Created by the session driver. Tools borrow it for one call and never
/// keep it; the registry only reads the session id for log correlation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunContext {
    session_id: String,
}

impl RunContext {
    /// Create a context for the given session
    #[must_use]
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
        }
    }

    /// Session identifier assigned by the session driver
    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}

/// Result from tool dispatch
///
/// `Ok` always carries the text to relay, including apologies for upstream
/// failures.
pub type ToolResult = Result<String, ToolError>;

/// Dispatch errors
///
/// These never describe an upstream failure. They mean the call itself was
/// malformed: the tool does not exist or its arguments did not type-check.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ToolError {
    /// No tool registered under this name
    #[error("Tool not found: {0}")]
    UnknownTool(String),

    /// Arguments did not match the tool's schema
    #[error("Invalid arguments for {tool}: {message}")]
    InvalidArguments {
        /// Tool that rejected the input
        tool: String,
        /// Decoder message
        message: String,
    },
}

impl ToolError {
    /// Build an `InvalidArguments` error from a JSON decoding failure
    #[must_use]
    pub fn invalid_arguments(tool: &str, error: &serde_json::Error) -> Self {
        Self::InvalidArguments {
            tool: tool.to_string(),
            message: error.to_string(),
        }
    }
}

/// An independently invocable tool
///
/// Implementations decode `input` into their typed arguments, perform at
/// most one outbound request, and return text. Upstream failures must come
/// back as `Ok` with an explanatory sentence.
#[async_trait::async_trait]
pub trait ToolExecutor: Send + Sync {
    /// Execute tool with JSON input string
    ///
    /// # Errors
    ///
    /// Returns `ToolError::InvalidArguments` if `input` does not decode into
    /// the tool's arguments
    async fn execute(&self, ctx: &RunContext, input: &str) -> ToolResult;
}

/// Shared, type-erased tool executor as stored in a registry
pub type ToolExecutorFn = Arc<dyn ToolExecutor>;

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    struct Echo;

    #[async_trait::async_trait]
    impl ToolExecutor for Echo {
        async fn execute(&self, _ctx: &RunContext, input: &str) -> ToolResult {
            let value: serde_json::Value =
                serde_json::from_str(input).map_err(|e| ToolError::invalid_arguments("echo", &e))?;
            Ok(value["text"].as_str().unwrap_or_default().to_string())
        }
    }

    #[test]
    fn test_run_context_session_id() {
        let ctx = RunContext::new("room-1");
        assert_eq!(ctx.session_id(), "room-1");
    }

    #[test]
    fn test_tool_error_display() {
        let error = ToolError::UnknownTool("nope".to_string());
        assert_eq!(error.to_string(), "Tool not found: nope");

        let error = ToolError::InvalidArguments {
            tool: "echo".to_string(),
            message: "missing field `text`".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid arguments for echo: missing field `text`"
        );
    }

    #[test]
    fn test_tool_serializes_schema() {
        let tool = Tool {
            name: "echo".to_string(),
            description: "Repeat text".to_string(),
            input_schema: serde_json::json!({"type": "object"}),
        };
        let encoded = serde_json::to_value(&tool).expect("serializable");
        assert_eq!(encoded["name"], "echo");
        assert_eq!(encoded["input_schema"]["type"], "object");
    }

    #[tokio::test]
    async fn test_executor_through_arc() {
        let executor: ToolExecutorFn = Arc::new(Echo);
        let ctx = RunContext::new("room-1");

        let text = executor
            .execute(&ctx, r#"{"text": "hi"}"#)
            .await
            .expect("valid input");
        assert_eq!(text, "hi");

        let err = executor.execute(&ctx, "not json").await;
        assert!(matches!(err, Err(ToolError::InvalidArguments { .. })));
    }
}
