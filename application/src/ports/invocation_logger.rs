//! Port for structured invocation logging.
//!
//! Separate from `tracing`-based diagnostics: this port records one
//! machine-readable line per tool call (tool, outcome, timing).

use serde::Serialize;

/// One finished tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvocationEvent {
    pub tool: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    pub duration_ms: u64,
    pub upstream_requests: usize,
}

/// Port for logging invocation events.
///
/// `log` is synchronous and non-fallible; a failing sink must not fail the
/// invocation.
pub trait InvocationLogger: Send + Sync {
    fn log(&self, event: InvocationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoInvocationLogger;

impl InvocationLogger for NoInvocationLogger {
    fn log(&self, _event: InvocationEvent) {}
}
