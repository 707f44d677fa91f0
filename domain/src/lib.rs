//! Domain layer for biznisweb-mcp
//!
//! This crate contains the tool mapping model, the GraphQL wire types and
//! the response reshaping rules. It has no dependencies on infrastructure
//! or presentation concerns and performs no I/O.
//!
//! # Core Concepts
//!
//! ## Tool
//!
//! A named, schema-described operation exposed to the calling agent. Each
//! [`ToolDefinition`] binds one tool to one upstream GraphQL operation.
//!
//! ## Upstream request
//!
//! Built deterministically from a definition and validated arguments by
//! [`UpstreamRequest::build`]. Every required parameter is resolved
//! (supplied or defaulted) before a request can exist.
//!
//! ## Envelope
//!
//! The `{ data, errors }` object returned by the endpoint. Any error entry
//! aborts extraction ([`GraphQlResponse::into_operation_result`]).

pub mod graphql;
pub mod reshape;
pub mod tool;
pub mod util;

// Re-export commonly used types
pub use graphql::{EnvelopeError, GraphQlError, GraphQlResponse, UpstreamRequest};
pub use reshape::{DateRange, OrderStatistics, StatusExclusion};
pub use tool::{
    DateCutoff, DefaultToolValidator, FieldRename, Pagination, ParamDefault, ParamType,
    PostProcess, ResolvedArguments, ResultShape, ToolCall, ToolDefinition, ToolError,
    ToolParameter, ToolResult, ToolResultMetadata, ToolSpec, ToolValidator, ValidationError,
};
