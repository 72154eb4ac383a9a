//! Tool registry for the voice agent session
//!
//! The registry is built once at process start and handed by reference to
//! the session construction step. It provides:
//! - Tool registration
//! - Tool execution by name
//! - Tool listing and introspection

use std::collections::HashMap;
use tracing::Instrument;
use voice_agent_core::agent::{RunContext, Tool, ToolError, ToolExecutorFn, ToolResult};

/// Static tool registry
///
/// The registry stores tools and their executors, allowing execution by
/// name. It holds no per-call state, so a shared reference serves any number
/// of concurrent calls.
///
/// ## Example
///
/// ```ignore
/// use voice_agent_tools::registry::ToolRegistry;
/// use voice_agent_tools::calculation::calculate_tool;
///
/// let mut registry = ToolRegistry::new();
/// let (tool, executor) = calculate_tool();
/// registry.register(tool, executor);
///
/// // Execute tool by name
/// let ctx = RunContext::new("room-1");
/// let result = registry.execute("calculate", &ctx, r#"{"expression": "1 + 1"}"#).await;
/// ```
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, (Tool, ToolExecutorFn)>,
}

impl ToolRegistry {
    /// Create a new empty tool registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool with its executor
    ///
    /// If a tool with the same name already exists, it will be replaced
    /// and this method returns `true`. Otherwise, returns `false`.
    pub fn register(&mut self, tool: Tool, executor: ToolExecutorFn) -> bool {
        self.tools
            .insert(tool.name.clone(), (tool, executor))
            .is_some()
    }

    /// Execute a tool by name
    ///
    /// Upstream failures never surface here: the tool answers with a
    /// sentence describing them.
    ///
    /// # Errors
    ///
    /// Returns `ToolError::UnknownTool` if no tool has this name,
    /// `ToolError::InvalidArguments` if `input` does not match its schema
    pub async fn execute(&self, name: &str, ctx: &RunContext, input: &str) -> ToolResult {
        let Some((_, executor)) = self.tools.get(name) else {
            tracing::warn!(tool = name, session = ctx.session_id(), "Unknown tool requested");
            return Err(ToolError::UnknownTool(name.to_string()));
        };

        let span = tracing::info_span!("tool_call", tool = name, session = ctx.session_id());
        let result = executor.execute(ctx, input).instrument(span).await;

        if let Err(e) = &result {
            tracing::warn!(tool = name, error = %e, "Tool call rejected");
        }
        result
    }

    /// Get a list of all registered tool names
    ///
    /// Returns a vector of tool names sorted alphabetically.
    #[must_use]
    pub fn list_tools(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Get all registered tools (for passing to the language model)
    ///
    /// Returns a vector of `Tool` definitions sorted by name.
    #[must_use]
    pub fn get_tools(&self) -> Vec<Tool> {
        let mut tool_list: Vec<Tool> = self.tools.values().map(|(tool, _)| tool.clone()).collect();
        tool_list.sort_by(|a, b| a.name.cmp(&b.name));
        tool_list
    }

    /// Get a specific tool by name
    ///
    /// Returns `None` if the tool is not registered.
    #[must_use]
    pub fn get_tool(&self, name: &str) -> Option<Tool> {
        self.tools.get(name).map(|(tool, _)| tool.clone())
    }

    /// Get the number of registered tools
    #[must_use]
    pub fn count(&self) -> usize {
        self.tools.len()
    }
}
