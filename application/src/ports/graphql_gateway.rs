//! GraphQL Gateway port
//!
//! Defines the interface for sending one request to the upstream endpoint.

use async_trait::async_trait;
use biznisweb_domain::{GraphQlResponse, UpstreamRequest};
use std::time::Duration;
use thiserror::Error;

/// Errors below the GraphQL layer: nothing usable came back.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Gateway to the upstream GraphQL endpoint
///
/// One call is one HTTP request: no retry, no batching, no caching.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait GraphQlGateway: Send + Sync {
    /// POST the request and decode the envelope.
    ///
    /// An envelope carrying `errors` is still `Ok`; interpreting it is the
    /// caller's job.
    async fn execute(&self, request: &UpstreamRequest) -> Result<GraphQlResponse, GatewayError>;
}
