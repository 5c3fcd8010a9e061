use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const JSONRPC_VERSION: &str = "2.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpTool {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        rename = "inputSchema",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub input_schema: Option<Value>,
}

impl McpTool {
    /// Declared parameters, if the input schema is an object schema with a
    /// non-empty `properties` map. A schema without `type` counts as an
    /// object schema.
    pub fn parameters(&self) -> Option<&Map<String, Value>> {
        self.input_schema
            .as_ref()
            .filter(|schema| match schema.get("type") {
                None => true,
                Some(kind) => kind == "object",
            })
            .and_then(|schema| schema.get("properties"))
            .and_then(|props| props.as_object())
            .filter(|props| !props.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpToolCall {
    pub name: String,
    pub arguments: Value,
}

/// Result of `tools/call`. `content` is normally an array of typed items,
/// but servers may return any value there.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpToolResult {
    #[serde(default)]
    pub content: Value,
    #[serde(rename = "isError", default, skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

impl McpToolResult {
    /// Text of every `"text"` item, in order. `None` when content is not an
    /// array.
    pub fn text_items(&self) -> Option<Vec<&str>> {
        let items = self.content.as_array()?;
        Some(
            items
                .iter()
                .filter(|item| item.get("type").and_then(|t| t.as_str()) == Some("text"))
                .filter_map(|item| item.get("text").and_then(|t| t.as_str()))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolListResponse {
    pub tools: Vec<McpTool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
    #[serde(default)]
    pub capabilities: ServerCapabilities,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerCapabilities {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsCapability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompts: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolsCapability {
    #[serde(rename = "listChanged", skip_serializing_if = "Option::is_none")]
    pub list_changed: Option<bool>,
}

// JSON-RPC envelopes

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: u64,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    pub fn new(id: u64, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            method: method.into(),
            params,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcNotification {
    pub jsonrpc: String,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcNotification {
    pub fn new(method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
        }
    }
}

/// Response to a request. The id is kept as a raw value because servers
/// answering a request they initiated may use strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcErrorObject>,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(JsonRpcErrorObject {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcErrorObject {
    pub const METHOD_NOT_FOUND: i64 = -32601;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parameters_requires_non_empty_properties() {
        let tool: McpTool = serde_json::from_value(json!({
            "name": "echo",
            "inputSchema": {"type": "object", "properties": {}}
        }))
        .unwrap();
        assert!(tool.parameters().is_none());

        let tool: McpTool = serde_json::from_value(json!({
            "name": "echo",
            "inputSchema": {
                "type": "object",
                "properties": {"message": {"type": "string"}}
            }
        }))
        .unwrap();
        assert_eq!(tool.parameters().map(|p| p.len()), Some(1));

        let tool: McpTool = serde_json::from_value(json!({"name": "bare"})).unwrap();
        assert!(tool.parameters().is_none());
        assert!(tool.description.is_none());
    }

    #[test]
    fn test_parameters_require_object_schema() {
        let tool: McpTool = serde_json::from_value(json!({
            "name": "scalar",
            "inputSchema": {
                "type": "string",
                "properties": {"message": {"type": "string"}}
            }
        }))
        .unwrap();
        assert!(tool.parameters().is_none());

        let tool: McpTool = serde_json::from_value(json!({
            "name": "untyped",
            "inputSchema": {"properties": {"message": {"type": "string"}}}
        }))
        .unwrap();
        assert_eq!(tool.parameters().map(|p| p.len()), Some(1));
    }

    #[test]
    fn test_text_items_skips_other_types() {
        let result: McpToolResult = serde_json::from_value(json!({
            "content": [
                {"type": "text", "text": "first"},
                {"type": "image", "data": "aGk=", "mimeType": "image/png"},
                {"type": "text", "text": "second"}
            ]
        }))
        .unwrap();
        assert_eq!(result.text_items(), Some(vec!["first", "second"]));
    }

    #[test]
    fn test_text_items_none_for_opaque_content() {
        let result: McpToolResult =
            serde_json::from_value(json!({"content": {"value": 42}})).unwrap();
        assert!(result.text_items().is_none());
    }
}
