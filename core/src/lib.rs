//! # Voice Agent Core
//!
//! Types shared between the hosted voice-agent session and the tool layer.
//!
//! The session driver (speech-to-text, language model, text-to-speech, turn
//! detection) lives outside this workspace. What it needs from us is small:
//!
//! - **Tool**: a name, a description and a JSON schema the language model
//!   uses to pick and populate a call
//! - **`RunContext`**: the per-conversation handle handed to every call
//! - **`ToolExecutor`**: an independently awaitable unit that turns a
//!   JSON argument object into text
//!
//! ## Example
//!
//! ```ignore
//! use voice_agent_core::agent::{RunContext, ToolExecutor};
//!
//! let ctx = RunContext::new("room-42");
//! let text = executor.execute(&ctx, r#"{"location": "London"}"#).await?;
//! ```

pub mod agent;

pub use agent::{RunContext, Tool, ToolError, ToolExecutor, ToolExecutorFn, ToolResult};
