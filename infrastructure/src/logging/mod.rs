//! Logging infrastructure: structured invocation logging.
//!
//! Provides [`JsonlInvocationLogger`], a JSONL file writer that implements
//! the [`InvocationLogger`](biznisweb_application::InvocationLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlInvocationLogger;
