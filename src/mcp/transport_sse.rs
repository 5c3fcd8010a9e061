// HTTP+SSE transport for MCP servers.
//
// The server keeps a GET stream open and announces, in its first `endpoint`
// event, the URL that client messages must be POSTed to. Responses come back
// on the stream as `message` events.

use async_trait::async_trait;
use eventsource_stream::{Event, EventStreamError, Eventsource};
use futures::stream::BoxStream;
use futures::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use url::Url;

use super::transport::Transport;
use crate::error::{ProbeError, Result};

type EventStream = BoxStream<'static, std::result::Result<Event, EventStreamError<reqwest::Error>>>;

pub struct SseTransport {
    client: reqwest::Client,
    events: Option<EventStream>,
    post_url: Url,
}

impl SseTransport {
    pub async fn connect(url: &Url) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;

        let response = client
            .get(url.clone())
            .header(ACCEPT, "text/event-stream")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProbeError::Transport(format!(
                "SSE connection failed with status {}: {}",
                status, body
            )));
        }

        let mut events: EventStream = response.bytes_stream().eventsource().boxed();
        let post_url = Self::wait_for_endpoint(&mut events, url).await?;
        tracing::debug!(post_url = %post_url, "SSE endpoint received");

        Ok(Self {
            client,
            events: Some(events),
            post_url,
        })
    }

    async fn wait_for_endpoint(events: &mut EventStream, sse_url: &Url) -> Result<Url> {
        while let Some(event) = events.next().await {
            let event = event.map_err(|e| ProbeError::Transport(e.to_string()))?;
            if event.event != "endpoint" {
                tracing::warn!(event = %event.event, "ignoring SSE event before endpoint");
                continue;
            }
            return resolve_endpoint(sse_url, event.data.trim());
        }
        Err(ProbeError::Transport(
            "SSE stream ended before an endpoint event was received".to_string(),
        ))
    }
}

/// Resolve the announced POST endpoint against the SSE URL. The endpoint must
/// stay on the same origin.
pub fn resolve_endpoint(sse_url: &Url, data: &str) -> Result<Url> {
    let endpoint = sse_url.join(data)?;
    if endpoint.origin() != sse_url.origin() {
        return Err(ProbeError::Transport(format!(
            "Endpoint origin does not match connection origin: {}",
            endpoint
        )));
    }
    Ok(endpoint)
}

#[async_trait]
impl Transport for SseTransport {
    async fn send(&mut self, message: Value) -> Result<()> {
        tracing::trace!(json = %message, "sse post");
        let response = self
            .client
            .post(self.post_url.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(&message)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProbeError::Transport(format!(
                "POST to {} failed with status {}: {}",
                self.post_url, status, body
            )));
        }
        Ok(())
    }

    async fn receive(&mut self) -> Result<Option<Value>> {
        let Some(events) = self.events.as_mut() else {
            return Ok(None);
        };

        while let Some(event) = events.next().await {
            let event = event.map_err(|e| ProbeError::Transport(e.to_string()))?;
            // Unnamed events default to "message"
            if !event.event.is_empty() && event.event != "message" {
                tracing::debug!(event = %event.event, "skipping SSE event");
                continue;
            }
            if event.data.is_empty() {
                continue;
            }
            tracing::trace!(json = %event.data, "sse receive");
            return Ok(Some(serde_json::from_str(&event.data)?));
        }

        self.events = None;
        Ok(None)
    }

    async fn close(&mut self) -> Result<()> {
        // Dropping the stream closes the underlying GET request
        self.events = None;
        Ok(())
    }
}
