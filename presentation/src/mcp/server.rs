//! MCP server: JSON-RPC dispatch and the stdio loop.
//!
//! ```text
//! stdin line ──▶ parse ──▶ classify ──┬─ Request      ──▶ dispatch ──▶ stdout line
//!                                     ├─ Notification ──▶ (no output)
//!                                     └─ Response     ──▶ (ignored)
//! ```
//!
//! Requests are handled one at a time, in arrival order.

use super::protocol::{
    CallToolParams, CallToolResult, Implementation, InitializeParams, InitializeResult,
    IncomingRequest, JsonRpcResponse, PROTOCOL_VERSION, RpcError,
};
use super::transport::{MessageKind, classify_message};
use biznisweb_application::ports::tool_executor::ToolExecutorPort;
use biznisweb_application::ports::tool_schema::ToolSchemaPort;
use biznisweb_domain::ToolCall;
use biznisweb_domain::util::truncate_str;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

/// MCP server exposing a tool executor.
pub struct McpServer {
    executor: Arc<dyn ToolExecutorPort>,
    schema: Arc<dyn ToolSchemaPort>,
    server_info: Implementation,
    instructions: Option<String>,
}

impl McpServer {
    pub fn new(executor: Arc<dyn ToolExecutorPort>, schema: Arc<dyn ToolSchemaPort>) -> Self {
        Self {
            executor,
            schema,
            server_info: Implementation {
                name: "biznisweb-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: None,
        }
    }

    /// Text sent to the client in the `initialize` result.
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Serve until `reader` reaches EOF.
    ///
    /// A line that is not UTF-8 is answered with a parse error; only I/O
    /// failures end the loop early.
    pub async fn run<R, W>(&self, mut reader: R, mut writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }
            let reply = match std::str::from_utf8(&buf) {
                Ok(line) => self.handle_line(line).await,
                Err(e) => {
                    warn!(error = %e, "Input line is not valid UTF-8");
                    parse_error_reply(format!("Parse error: {}", e))
                }
            };
            if let Some(reply) = reply {
                writer.write_all(reply.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }
        info!("Input closed, shutting down");
        Ok(())
    }

    /// Handle one input line; `None` means nothing is written back.
    pub async fn handle_line(&self, line: &str) -> Option<String> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        debug!(message = %truncate_str(line, 500), "Received");

        let reply = match serde_json::from_str::<Value>(line) {
            Ok(Value::Array(batch)) => self.handle_batch(batch).await,
            Ok(message) => self
                .handle_message(message)
                .await
                .and_then(|r| serde_json::to_value(r).ok()),
            Err(e) => {
                warn!(error = %e, "Malformed JSON");
                return parse_error_reply(format!("Parse error: {}", e));
            }
        }?;

        serde_json::to_string(&reply).ok()
    }

    async fn handle_batch(&self, batch: Vec<Value>) -> Option<Value> {
        if batch.is_empty() {
            return serde_json::to_value(JsonRpcResponse::error(
                Value::Null,
                RpcError::invalid_request("Empty batch"),
            ))
            .ok();
        }

        let mut responses = Vec::new();
        for message in batch {
            if let Some(response) = self.handle_message(message).await {
                responses.push(response);
            }
        }
        // a batch of notifications gets no reply at all
        (!responses.is_empty()).then(|| json!(responses))
    }

    /// Dispatch one parsed message.
    pub async fn handle_message(&self, message: Value) -> Option<JsonRpcResponse> {
        match classify_message(&message) {
            MessageKind::Request { id } => {
                let request = match serde_json::from_value::<IncomingRequest>(message) {
                    Ok(request) => request,
                    Err(e) => {
                        return Some(JsonRpcResponse::error(
                            id,
                            RpcError::invalid_request(e.to_string()),
                        ));
                    }
                };
                Some(self.handle_request(request).await)
            }
            MessageKind::Notification { method } => {
                debug!(method = %method, "Notification");
                None
            }
            MessageKind::Response => {
                debug!("Ignoring client response");
                None
            }
            MessageKind::Invalid => Some(JsonRpcResponse::error(
                Value::Null,
                RpcError::invalid_request("Not a JSON-RPC request"),
            )),
        }
    }

    async fn handle_request(&self, request: IncomingRequest) -> JsonRpcResponse {
        let IncomingRequest { id, method, params } = request;

        let outcome = match method.as_str() {
            "initialize" => self.initialize(params),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(self.list_tools()),
            "tools/call" => self.call_tool(params).await,
            other => Err(RpcError::method_not_found(other)),
        };

        match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => {
                debug!(method = %method, code = error.code, "Request failed");
                JsonRpcResponse::error(id, error)
            }
        }
    }

    fn initialize(&self, params: Option<Value>) -> Result<Value, RpcError> {
        let params: InitializeParams = match params {
            Some(p) => serde_json::from_value(p).map_err(|e| RpcError::invalid_params(e.to_string()))?,
            None => InitializeParams::default(),
        };

        if let Some(client) = &params.client_info {
            info!(client = %client.name, version = %client.version, "Client connected");
        }

        let result = InitializeResult {
            protocol_version: params
                .protocol_version
                .unwrap_or_else(|| PROTOCOL_VERSION.to_string()),
            capabilities: json!({"tools": {"listChanged": false}}),
            server_info: self.server_info.clone(),
            instructions: self.instructions.clone(),
        };
        serde_json::to_value(result).map_err(|e| RpcError::new(
            super::protocol::error_codes::INTERNAL_ERROR,
            e.to_string(),
        ))
    }

    fn list_tools(&self) -> Value {
        json!({"tools": self.schema.all_tools_schema(self.executor.tool_spec())})
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value, RpcError> {
        let params: CallToolParams = params
            .ok_or_else(|| RpcError::invalid_params("Missing params"))
            .and_then(|p| {
                serde_json::from_value(p).map_err(|e| RpcError::invalid_params(e.to_string()))
            })?;

        let call = ToolCall::from_json(&params.name, params.arguments.unwrap_or(Value::Null))
            .ok_or_else(|| RpcError::invalid_params("'arguments' must be an object"))?;

        let result = self.executor.execute(&call).await;
        let text = result.to_text();
        let payload = if result.is_success() {
            CallToolResult::success(text)
        } else {
            CallToolResult::error(text)
        };

        serde_json::to_value(payload).map_err(|e| RpcError::new(
            super::protocol::error_codes::INTERNAL_ERROR,
            e.to_string(),
        ))
    }
}

fn parse_error_reply(message: String) -> Option<String> {
    serde_json::to_string(&JsonRpcResponse::error(Value::Null, RpcError::parse_error(message))).ok()
}
