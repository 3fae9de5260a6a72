//! Stdio protocol server.
//!
//! Reads one JSON-RPC message per line, answers on the writer, and stops
//! cleanly at EOF. Requests are handled strictly in arrival order.

use log::{debug, info, warn};
use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::Result;
use crate::langfuse::LangfuseApi;
use crate::tools::ToolRouter;

use super::messages::{CallToolParams, RpcError, RpcRequest, RpcResponse};

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "mcp-server-langfuse";

/// MCP server bound to a tool router
pub struct McpServer<A> {
    router: ToolRouter<A>,
}

impl<A: LangfuseApi> McpServer<A> {
    pub fn new(router: ToolRouter<A>) -> Self {
        Self { router }
    }

    /// Serve until the reader hits EOF.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("Serving {} over stdio", SERVER_NAME);
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }

            let response = match std::str::from_utf8(&buf) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    self.handle_line(trimmed).await
                }
                Err(e) => {
                    warn!("Message is not valid UTF-8: {}", e);
                    Some(RpcResponse::error(
                        Value::Null,
                        RpcError::parse_error(format!("Parse error: {}", e)),
                    ))
                }
            };

            if let Some(response) = response {
                let response_json = serde_json::to_string(&response)?;
                writer.write_all(response_json.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }

        info!("Input closed, shutting down");
        Ok(())
    }

    /// Handle one raw line. `None` means nothing is written back.
    pub async fn handle_line(&self, line: &str) -> Option<RpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                warn!("Unparsable message: {}", e);
                return Some(RpcResponse::error(
                    Value::Null,
                    RpcError::parse_error(format!("Parse error: {}", e)),
                ));
            }
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<RpcRequest>(value) {
            Ok(request) => self.handle(request).await,
            Err(e) => {
                warn!("Invalid request: {}", e);
                Some(RpcResponse::error(
                    id,
                    RpcError::invalid_request(format!("Invalid request: {}", e)),
                ))
            }
        }
    }

    /// Handle a decoded request. Notifications yield `None`.
    pub async fn handle(&self, request: RpcRequest) -> Option<RpcResponse> {
        debug!("Received {}", request.method);
        if request.is_notification() {
            return None;
        }
        let id = request.id.unwrap_or(Value::Null);

        let response = match request.method.as_str() {
            "initialize" => RpcResponse::success(id, initialize_result()),
            "ping" => RpcResponse::success(id, json!({})),
            "tools/list" => RpcResponse::success(id, json!({ "tools": self.router.list_tools() })),
            "tools/call" => self.call_tool(id, request.params).await,
            other => RpcResponse::error(id, RpcError::method_not_found(other)),
        };
        Some(response)
    }

    async fn call_tool(&self, id: Value, params: Option<Value>) -> RpcResponse {
        let params: CallToolParams = match params.map(serde_json::from_value) {
            Some(Ok(params)) => params,
            Some(Err(e)) => {
                return RpcResponse::error(
                    id,
                    RpcError::invalid_params(format!("Invalid tools/call params: {}", e)),
                );
            }
            None => {
                return RpcResponse::error(id, RpcError::invalid_params("Missing tools/call params"));
            }
        };

        let result = self.router.call_tool(&params.name, params.arguments).await;
        match serde_json::to_value(&result) {
            Ok(value) => RpcResponse::success(id, value),
            Err(e) => RpcResponse::error(id, RpcError::internal_error(e.to_string())),
        }
    }
}

fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": { "tools": {} },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION"),
        }
    })
}
