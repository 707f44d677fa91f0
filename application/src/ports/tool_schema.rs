//! Tool schema conversion port.
//!
//! Separates "which tools exist" (domain) from "how to advertise them"
//! (infrastructure, JSON Schema).

use biznisweb_domain::{ToolDefinition, ToolSpec};

pub trait ToolSchemaPort: Send + Sync {
    /// Convert a single tool definition to a JSON Schema tool descriptor.
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value;

    /// Convert all tools (sorted by name).
    fn all_tools_schema(&self, spec: &ToolSpec) -> Vec<serde_json::Value>;
}
