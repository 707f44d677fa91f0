//! Tool domain value objects: immutable result and error types
//!
//! Every invocation produces a [`ToolResult`]: either the reshaped upstream
//! data as JSON, or a [`ToolError`] with a stable code. Errors are never
//! retried by the adapter; the code only tells the caller what went wrong.

use serde::{Deserialize, Serialize};

/// Error reported for a failed invocation.
///
/// | Code | Description |
/// |------|-------------|
/// | `INVALID_ARGUMENT` | Missing, unknown or mistyped parameter |
/// | `NOT_FOUND` | Unknown tool, or the requested entity does not exist |
/// | `UPSTREAM_ERROR` | GraphQL envelope carried `errors` |
/// | `TIMEOUT` | Upstream call exceeded the configured bound |
/// | `TRANSPORT_ERROR` | Connection, HTTP or decoding failure |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolError {
    /// Error code (e.g., "NOT_FOUND", "UPSTREAM_ERROR")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ToolError {
    pub const INVALID_ARGUMENT: &'static str = "INVALID_ARGUMENT";
    pub const NOT_FOUND: &'static str = "NOT_FOUND";
    pub const UPSTREAM_ERROR: &'static str = "UPSTREAM_ERROR";
    pub const TIMEOUT: &'static str = "TIMEOUT";
    pub const TRANSPORT_ERROR: &'static str = "TRANSPORT_ERROR";

    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(Self::INVALID_ARGUMENT, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(Self::NOT_FOUND, message)
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(Self::UPSTREAM_ERROR, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(Self::TIMEOUT, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(Self::TRANSPORT_ERROR, message)
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(details) = &self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for ToolError {}

/// Result of a tool invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Name of the tool that was invoked
    pub tool_name: String,
    pub success: bool,
    /// Reshaped upstream data (for successful invocations)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolError>,
    #[serde(default)]
    pub metadata: ToolResultMetadata,
}

/// Structured metadata about an invocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolResultMetadata {
    /// Wall-clock duration in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    /// Number of upstream requests issued
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_requests: Option<usize>,
}

impl ToolResult {
    pub fn success(tool_name: impl Into<String>, output: serde_json::Value) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: true,
            output: Some(output),
            error: None,
            metadata: ToolResultMetadata::default(),
        }
    }

    pub fn failure(tool_name: impl Into<String>, error: ToolError) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: false,
            output: None,
            error: Some(error),
            metadata: ToolResultMetadata::default(),
        }
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.metadata.duration_ms = Some(duration_ms);
        self
    }

    pub fn with_upstream_requests(mut self, count: usize) -> Self {
        self.metadata.upstream_requests = Some(count);
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn output(&self) -> Option<&serde_json::Value> {
        self.output.as_ref()
    }

    pub fn error(&self) -> Option<&ToolError> {
        self.error.as_ref()
    }

    /// Text rendering handed to the caller: pretty JSON on success,
    /// the error message on failure.
    pub fn to_text(&self) -> String {
        match (&self.output, &self.error) {
            (_, Some(error)) => error.to_string(),
            (Some(output), None) => {
                serde_json::to_string_pretty(output).unwrap_or_else(|_| output.to_string())
            }
            (None, None) => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_error_display() {
        let err = ToolError::upstream("Unknown argument").with_details("getOrder");
        assert_eq!(err.to_string(), "[UPSTREAM_ERROR] Unknown argument (getOrder)");
    }

    #[test]
    fn test_tool_result_success_text() {
        let result = ToolResult::success("get_order", json!({"order_num": "Čč-1"})).with_duration(12);

        assert!(result.is_success());
        assert_eq!(result.metadata.duration_ms, Some(12));
        // non-ASCII kept as-is
        assert!(result.to_text().contains("Čč-1"));
    }

    #[test]
    fn test_tool_result_failure() {
        let result = ToolResult::failure("get_order", ToolError::not_found("Order 1 not found"));

        assert!(!result.is_success());
        assert!(result.output().is_none());
        assert_eq!(result.error().unwrap().code, ToolError::NOT_FOUND);
        assert_eq!(result.to_text(), "[NOT_FOUND] Order 1 not found");
    }
}
