//! Presentation layer for biznisweb-mcp
//!
//! This crate contains the CLI definition and the MCP server that exposes
//! the tool catalog over stdio.

pub mod cli;
pub mod mcp;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use mcp::server::McpServer;
