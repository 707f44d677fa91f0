//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod clock;
pub mod graphql_gateway;
pub mod invocation_logger;
pub mod tool_executor;
pub mod tool_schema;
