//! HTTP adapter for the upstream GraphQL endpoint.

mod gateway;

pub use gateway::{API_KEY_HEADER, HttpGraphQlGateway};
