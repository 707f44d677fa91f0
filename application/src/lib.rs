//! Application layer for biznisweb-mcp
//!
//! This crate contains the tool adapter use case, port definitions, and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::AdapterConfig;
pub use ports::{
    clock::{Clock, FixedClock},
    graphql_gateway::{GatewayError, GraphQlGateway},
    invocation_logger::{InvocationEvent, InvocationLogger, NoInvocationLogger},
    tool_executor::ToolExecutorPort,
    tool_schema::ToolSchemaPort,
};
pub use use_cases::invoke_tool::{InvokeToolError, InvokeToolUseCase, PreparedInvocation};
