//! Tool trait — the abstraction over agent capabilities.
//!
//! Tools are what let the agent act on the machine: run shell commands,
//! read and write files, list directories. The registry owns the catalog,
//! validates model-supplied arguments against each tool's schema, and
//! dispatches calls by name.

use crate::error::ToolError;
use crate::provider::ToolDefinition;
use crate::schema::{ParamSchema, ParamValue};
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Validated arguments handed to a tool implementation.
pub type ToolArgs = BTreeMap<String, ParamValue>;

/// A request to execute a tool, parsed from an assistant message.
#[derive(Debug, Clone)]
pub struct ToolCall {
    /// Correlation ID (matches the endpoint's tool_call.id)
    pub id: String,

    /// Name of the tool to execute
    pub name: String,

    /// Raw argument payload, validated at dispatch
    pub arguments: serde_json::Value,
}

/// The result of a tool execution.
///
/// Failures of the operation itself (missing file, non-zero exit) are
/// reported in `output` with `success = false` so the model can see and
/// react to them; [`ToolError`] is reserved for dispatch-level problems.
#[derive(Debug, Clone)]
pub struct ToolResult {
    /// The call ID this result answers
    pub call_id: String,

    /// Whether the operation succeeded
    pub success: bool,

    /// Human-readable output, always fed back to the model
    pub output: String,
}

impl ToolResult {
    pub fn ok(call_id: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            call_id: call_id.into(),
            success: true,
            output: output.into(),
        }
    }

    pub fn failure(call_id: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            call_id: call_id.into(),
            success: false,
            output: output.into(),
        }
    }
}

/// The core Tool trait.
///
/// Each built-in operation implements this trait and is registered in the
/// [`ToolRegistry`] at agent construction time.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool (e.g., "execute_command").
    fn name(&self) -> &str;

    /// A description of what this tool does (sent to the model).
    fn description(&self) -> &str;

    /// The declared parameter schema.
    fn schema(&self) -> ParamSchema;

    /// Execute the tool with validated arguments.
    async fn execute(&self, args: ToolArgs) -> std::result::Result<ToolResult, ToolError>;

    /// Convert this tool into a definition for the endpoint.
    fn to_definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.schema().to_json_schema(),
        }
    }
}

/// The static catalog of invocable tools.
///
/// Registration order is preserved: `definitions()` advertises tools to the
/// endpoint in the order they were registered. The catalog is built once at
/// startup and never mutated afterwards.
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Register a tool. Replaces any existing tool with the same name.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        if let Some(existing) = self.tools.iter_mut().find(|t| t.name() == tool.name()) {
            *existing = tool;
        } else {
            self.tools.push(tool);
        }
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|t| t.name() == name)
            .map(|t| t.as_ref())
    }

    /// All tool definitions, in registration order.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.to_definition()).collect()
    }

    /// All registered tool names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Validate and execute a tool call.
    pub async fn execute(&self, call: &ToolCall) -> std::result::Result<ToolResult, ToolError> {
        let tool = self
            .get(&call.name)
            .ok_or_else(|| ToolError::NotFound(call.name.clone()))?;

        let args = tool
            .schema()
            .validate(&call.arguments)
            .map_err(ToolError::InvalidArguments)?;

        let mut result = tool.execute(args).await?;
        result.call_id = call.id.clone();
        Ok(result)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
