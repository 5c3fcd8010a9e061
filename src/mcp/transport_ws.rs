use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use url::Url;

use super::transport::Transport;
use crate::error::Result;

const MCP_SUBPROTOCOL: &str = "mcp";

/// WebSocket transport: one JSON-RPC message per text frame.
pub struct WebSocketTransport {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    closed: bool,
}

impl WebSocketTransport {
    pub async fn connect(url: &Url) -> Result<Self> {
        let mut request = url.as_str().into_client_request()?;
        request.headers_mut().insert(
            "Sec-WebSocket-Protocol",
            HeaderValue::from_static(MCP_SUBPROTOCOL),
        );

        let (stream, response) = connect_async(request).await?;
        tracing::debug!(status = %response.status(), "websocket connected");

        Ok(Self {
            stream,
            closed: false,
        })
    }
}

#[async_trait]
impl Transport for WebSocketTransport {
    async fn send(&mut self, message: Value) -> Result<()> {
        let text = serde_json::to_string(&message)?;
        tracing::trace!(json = %text, "ws send");
        self.stream.send(Message::Text(text.into())).await?;
        Ok(())
    }

    async fn receive(&mut self) -> Result<Option<Value>> {
        while let Some(frame) = self.stream.next().await {
            match frame? {
                Message::Text(text) => {
                    tracing::trace!(json = %text.as_str(), "ws receive");
                    return Ok(Some(serde_json::from_str(text.as_str())?));
                }
                Message::Binary(data) => {
                    return Ok(Some(serde_json::from_slice(&data)?));
                }
                Message::Close(frame) => {
                    tracing::debug!(?frame, "websocket closed by server");
                    self.closed = true;
                    return Ok(None);
                }
                // Pings are answered by tungstenite on the next read/write
                _ => continue,
            }
        }
        self.closed = true;
        Ok(None)
    }

    async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.stream.close(None).await?;
        Ok(())
    }
}
