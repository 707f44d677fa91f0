//! MCP (Model Context Protocol) over stdio.
//!
//! Newline-delimited JSON-RPC 2.0: one message per line on stdin, one
//! response per line on stdout. Only the tool surface is implemented:
//! `initialize`, `ping`, `tools/list` and `tools/call`.

pub mod protocol;
pub mod server;
pub mod transport;
