//! GraphQL wire model
//!
//! [`UpstreamRequest`] is built deterministically from a tool definition and
//! validated arguments; [`GraphQlResponse`] is the envelope the endpoint
//! returns. Neither type performs I/O.

pub mod envelope;
pub mod request;

pub use envelope::{EnvelopeError, GraphQlError, GraphQlResponse};
pub use request::UpstreamRequest;
