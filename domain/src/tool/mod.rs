//! Tool domain module
//!
//! Defines the **mapping table** abstractions: how a caller-facing tool
//! corresponds to one upstream GraphQL operation.
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌────────────────────┐    ┌──────────────┐
//! │ ToolSpec     │───▶│ ToolCall     │───▶│ ResolvedArguments  │───▶│ ToolResult   │
//! │ (catalog)    │    │ (invocation) │    │ (validated)        │    │ (output)     │
//! └──────────────┘    └──────────────┘    └────────────────────┘    └──────────────┘
//! ```
//!
//! A [`ToolDefinition`] is data, not code: parameters with their variable
//! targets and defaults, fixed variables, the response field to extract and
//! the renames to apply. One generic execution routine in the application
//! layer interprets it, so required-parameter and default handling is the
//! same for every tool.
//!
//! # Key Types
//!
//! - [`ToolSpec`]: Catalog of tools keyed by name
//! - [`ToolDefinition`]: One tool and its upstream binding
//! - [`ToolCall`]: An invocation request with arguments
//! - [`ToolValidator`]: Pure validation producing [`ResolvedArguments`]
//! - [`ToolResult`]: Outcome with structured metadata

pub mod arguments;
pub mod entities;
pub mod traits;
pub mod value_objects;

pub use arguments::ResolvedArguments;
pub use entities::{
    DateCutoff, FieldRename, Pagination, ParamDefault, ParamType, PostProcess, ResultShape,
    ToolCall, ToolDefinition, ToolParameter, ToolSpec,
};
pub use traits::{DefaultToolValidator, ToolValidator, ValidationError};
pub use value_objects::{ToolError, ToolResult, ToolResultMetadata};
