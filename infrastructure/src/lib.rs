//! Infrastructure layer for biznisweb-mcp
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the HTTP GraphQL gateway, the BizniWeb tool
//! catalog, configuration file loading and the invocation log.

pub mod clock;
pub mod config;
pub mod graphql;
pub mod logging;
pub mod tools;

// Re-export commonly used types
pub use clock::SystemClock;
pub use config::{AppConfig, ConfigLoader, ConfigValidationError, FileConfig};
pub use graphql::HttpGraphQlGateway;
pub use logging::JsonlInvocationLogger;
pub use tools::{JsonSchemaToolConverter, biznisweb_tool_spec};
