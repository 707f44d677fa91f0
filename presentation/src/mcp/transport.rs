//! Message classification for the stdio transport.

use serde_json::Value;

/// Kind of an incoming JSON-RPC message.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageKind {
    /// Has `id` and `method`: must be answered
    Request { id: Value },
    /// Has `method` but no `id`: never answered
    Notification { method: String },
    /// Has `id` but no `method`: a client response, ignored
    Response,
    /// Not a JSON-RPC message at all
    Invalid,
}

/// Classify a JSON-RPC message based on its fields.
pub fn classify_message(json: &Value) -> MessageKind {
    if !json.is_object() {
        return MessageKind::Invalid;
    }
    let id = json.get("id").filter(|v| v.is_string() || v.is_number());
    let method = json.get("method").and_then(|v| v.as_str());

    match (id, method) {
        (Some(id), Some(_)) => MessageKind::Request { id: id.clone() },
        (None, Some(method)) => MessageKind::Notification {
            method: method.to_string(),
        },
        (Some(_), None) => MessageKind::Response,
        (None, None) => MessageKind::Invalid,
    }
}
