//! Tool Executor port
//!
//! The caller-facing surface depends on this port, not on the adapter.

use async_trait::async_trait;
use biznisweb_domain::{ToolCall, ToolDefinition, ToolResult, ToolSpec};

/// Port for tool execution
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    /// Get the specification of all available tools
    fn tool_spec(&self) -> &ToolSpec;

    /// Check if a tool is available
    fn has_tool(&self, name: &str) -> bool {
        self.tool_spec().get(name).is_some()
    }

    /// Get the definition of a specific tool
    fn get_tool(&self, name: &str) -> Option<&ToolDefinition> {
        self.tool_spec().get(name)
    }

    /// Execute a tool call. Failures are reported in the result, never
    /// as a panic or an `Err`.
    async fn execute(&self, call: &ToolCall) -> ToolResult;
}
