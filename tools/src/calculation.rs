//! Calculation tool for arithmetic expressions
//!
//! Expressions are evaluated by `meval`, which only knows numbers, operators,
//! a fixed set of math functions and the constants `pi` and `e`. Anything
//! else fails to parse or evaluate; nothing is ever executed.

use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use voice_agent_core::agent::{
    RunContext, Tool, ToolError, ToolExecutor, ToolExecutorFn, ToolResult,
};

/// Registered tool name
pub const NAME: &str = "calculate";

const INVALID_INPUT: &str = "Sorry, I couldn't calculate that. Please check the expression.";

#[derive(Debug, Deserialize)]
struct CalculateArgs {
    expression: String,
}

/// Arithmetic evaluation tool
#[derive(Clone, Copy, Debug, Default)]
pub struct CalculateTool;

impl CalculateTool {
    /// Evaluate `expression` and describe the result
    ///
    /// Evaluation runs on the blocking pool so a parser panic ends that task
    /// only and still yields the invalid-input sentence.
    pub async fn calculate(&self, expression: &str) -> String {
        let owned = expression.to_string();
        let outcome = tokio::task::spawn_blocking(move || evaluate(&owned))
            .await
            .unwrap_or_else(|e| Err(format!("evaluator task failed: {e}")));

        match outcome {
            Ok(value) => {
                let result = format_number(value);
                tracing::info!(expression, result = %result, "Calculation complete");
                format!("The result of '{expression}' is {result}.")
            }
            Err(reason) => {
                tracing::warn!(expression, reason = %reason, "Calculation failed");
                INVALID_INPUT.to_string()
            }
        }
    }
}

/// Evaluate an expression, rejecting blank input and non-finite results
///
/// # Errors
///
/// Returns a description of the parse or evaluation failure
pub fn evaluate(expression: &str) -> Result<f64, String> {
    // The parser panics on whitespace-only input
    if expression.trim().is_empty() {
        return Err("empty expression".to_string());
    }

    let value = meval::eval_str(expression).map_err(|e| e.to_string())?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("non-finite result: {value}"))
    }
}

/// Print integral values without a fractional part
fn format_number(value: f64) -> String {
    // Folds -0.0 into 0.0
    let value = value + 0.0;
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

#[async_trait::async_trait]
impl ToolExecutor for CalculateTool {
    async fn execute(&self, _ctx: &RunContext, input: &str) -> ToolResult {
        let args: CalculateArgs =
            serde_json::from_str(input).map_err(|e| ToolError::invalid_arguments(NAME, &e))?;
        Ok(self.calculate(&args.expression).await)
    }
}

/// Tool definition for `calculate`
#[must_use]
pub fn definition() -> Tool {
    Tool {
        name: NAME.to_string(),
        description: "Evaluate an arithmetic expression (supports +, -, *, /, %, ^, \
                      parentheses and functions like sqrt/sin/cos)"
            .to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "expression": {
                    "type": "string",
                    "description": "Arithmetic expression to evaluate, e.g. '5 * (3 + 1)'"
                }
            },
            "required": ["expression"]
        }),
    }
}

/// Create the `calculate` tool
#[must_use]
pub fn calculate_tool() -> (Tool, ToolExecutorFn) {
    (definition(), Arc::new(CalculateTool))
}
