use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use super::transport_sse::SseTransport;
use super::transport_ws::WebSocketTransport;
use crate::cli::{ConnectionTarget, TransportKind};
use crate::error::Result;

/// A message channel to an MCP server. Each item is one JSON-RPC message.
#[async_trait]
pub trait Transport: Send {
    async fn send(&mut self, message: Value) -> Result<()>;

    /// Next message from the server, or `None` once the server has closed
    /// the channel.
    async fn receive(&mut self) -> Result<Option<Value>>;

    async fn close(&mut self) -> Result<()>;
}

/// Endpoint the transport connects to: `<base>/ws` or `<base>/sse`.
pub fn endpoint_url(target: &ConnectionTarget) -> Result<Url> {
    let base = target.server_url.trim_end_matches('/');
    let path = match target.kind {
        TransportKind::WebSocket => "ws",
        TransportKind::Sse => "sse",
    };
    Ok(Url::parse(&format!("{}/{}", base, path))?)
}

/// Open the transport for `target`. Single attempt, no fallback between
/// transport kinds.
pub async fn connect(target: &ConnectionTarget) -> Result<Box<dyn Transport>> {
    let endpoint = endpoint_url(target)?;
    tracing::debug!(kind = %target.kind, endpoint = %endpoint, "opening transport");

    match target.kind {
        TransportKind::WebSocket => Ok(Box::new(WebSocketTransport::connect(&endpoint).await?)),
        TransportKind::Sse => Ok(Box::new(SseTransport::connect(&endpoint).await?)),
    }
}
