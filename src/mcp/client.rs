use async_trait::async_trait;
use serde_json::{json, Value};

use super::transport::Transport;
use super::types::{
    InitializeResult, JsonRpcErrorObject, JsonRpcNotification, JsonRpcRequest, JsonRpcResponse,
    McpTool, McpToolCall, McpToolResult, ServerInfo, ToolListResponse,
};
use crate::error::{ProbeError, Result};

// MCP Protocol constants
const MCP_PROTOCOL_VERSION: &str = "2024-11-05";
const CLIENT_NAME: &str = env!("CARGO_PKG_NAME");
const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The operations the menu needs from a connected server.
#[async_trait]
pub trait ToolSession: Send {
    async fn list_tools(&mut self) -> Result<Vec<McpTool>>;
    async fn call_tool(&mut self, tool_call: &McpToolCall) -> Result<McpToolResult>;
}

/// JSON-RPC client over a single transport. Requests are strictly
/// sequential: each call waits for its own response before returning.
pub struct McpClient {
    transport: Box<dyn Transport>,
    next_id: u64,
    server_info: ServerInfo,
    closed: bool,
}

impl McpClient {
    /// Perform the `initialize` handshake on an opened transport.
    pub async fn connect(transport: Box<dyn Transport>) -> Result<Self> {
        let mut client = Self {
            transport,
            next_id: 1,
            server_info: ServerInfo {
                name: String::new(),
                version: String::new(),
            },
            closed: false,
        };

        let init_params = json!({
            "protocolVersion": MCP_PROTOCOL_VERSION,
            "capabilities": {},
            "clientInfo": {
                "name": CLIENT_NAME,
                "version": CLIENT_VERSION
            }
        });

        let response = client.send_request("initialize", Some(init_params)).await?;
        let init_result: InitializeResult = serde_json::from_value(response)?;
        tracing::debug!(
            server = %init_result.server_info.name,
            version = %init_result.server_info.version,
            protocol = %init_result.protocol_version,
            "initialize complete"
        );
        if let Some(tools) = &init_result.capabilities.tools {
            tracing::debug!(list_changed = ?tools.list_changed, "server offers tools");
        }
        client.server_info = init_result.server_info;

        client
            .send_notification("notifications/initialized", None)
            .await?;

        Ok(client)
    }

    pub fn server_info(&self) -> &ServerInfo {
        &self.server_info
    }

    async fn send_request(&mut self, method: &str, params: Option<Value>) -> Result<Value> {
        let id = self.next_id;
        self.next_id += 1;

        let request = JsonRpcRequest::new(id, method, params);
        self.transport.send(serde_json::to_value(&request)?).await?;

        while let Some(message) = self.transport.receive().await? {
            // Server-initiated request
            if message.get("method").is_some() && message.get("id").is_some() {
                self.answer_server_request(&message).await?;
                continue;
            }

            // Notification
            if message.get("method").is_some() {
                tracing::debug!(
                    method = %message["method"],
                    "ignoring server notification"
                );
                continue;
            }

            if message.get("id") != Some(&json!(id)) {
                tracing::warn!(expected = id, message = %message, "unexpected response id");
                continue;
            }

            let response: JsonRpcResponse = serde_json::from_value(message)?;
            if let Some(error) = response.error {
                return Err(ProbeError::Server {
                    code: error.code,
                    message: error.message,
                });
            }
            return response.result.ok_or_else(|| {
                ProbeError::Protocol(format!("response to '{}' has no result", method))
            });
        }

        Err(ProbeError::ConnectionClosed)
    }

    async fn send_notification(&mut self, method: &str, params: Option<Value>) -> Result<()> {
        let notification = JsonRpcNotification::new(method, params);
        self.transport
            .send(serde_json::to_value(&notification)?)
            .await
    }

    async fn answer_server_request(&mut self, message: &Value) -> Result<()> {
        let id = message["id"].clone();
        let method = message["method"].as_str().unwrap_or_default();

        let response = if method == "ping" {
            JsonRpcResponse::success(id, json!({}))
        } else {
            tracing::warn!(method, "unsupported server request");
            JsonRpcResponse::failure(
                id,
                JsonRpcErrorObject::METHOD_NOT_FOUND,
                format!("Method not found: {}", method),
            )
        };

        self.transport.send(serde_json::to_value(&response)?).await
    }

    /// Close the transport. Calling this more than once is a no-op.
    pub async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        tracing::debug!("closing transport");
        self.transport.close().await
    }
}

#[async_trait]
impl ToolSession for McpClient {
    async fn list_tools(&mut self) -> Result<Vec<McpTool>> {
        let response = self.send_request("tools/list", None).await?;
        let tool_list: ToolListResponse = serde_json::from_value(response)?;
        Ok(tool_list.tools)
    }

    async fn call_tool(&mut self, tool_call: &McpToolCall) -> Result<McpToolResult> {
        let params = json!({
            "name": tool_call.name,
            "arguments": tool_call.arguments,
        });

        let response = self.send_request("tools/call", Some(params)).await?;
        let result: McpToolResult = serde_json::from_value(response)?;
        Ok(result)
    }
}
