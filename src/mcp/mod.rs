pub mod client;
pub mod transport;
pub mod transport_sse;
pub mod transport_ws;
pub mod types;

pub use client::{McpClient, ToolSession};
pub use transport::{connect, endpoint_url, Transport};
pub use types::{McpTool, McpToolCall, McpToolResult};
