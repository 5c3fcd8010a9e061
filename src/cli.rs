use clap::Parser;
use std::fmt;

pub const DEFAULT_SERVER_URL: &str = "ws://localhost:3000";

#[derive(Parser, Debug)]
#[command(name = "mcp-probe")]
#[command(about = "Interactive client for testing MCP server tools", long_about = None)]
pub struct Args {
    #[arg(
        long = "url",
        help = "MCP server URL (ws://... for WebSocket, http://... for SSE)"
    )]
    pub url: Option<String>,

    #[arg(short = 'v', long = "verbose", help = "Print diagnostic output")]
    pub verbose: bool,

    #[arg(long = "model", help = "Model used for AI parameter generation")]
    pub model: Option<String>,

    #[arg(
        long = "api-endpoint",
        help = "Custom API base URL (e.g., http://localhost:11434/v1)"
    )]
    pub api_endpoint: Option<String>,

    #[arg(long = "config-init", help = "Write an example config file and exit")]
    pub config_init: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    WebSocket,
    Sse,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportKind::WebSocket => write!(f, "WebSocket"),
            TransportKind::Sse => write!(f, "SSE"),
        }
    }
}

/// Server to connect to, fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionTarget {
    pub server_url: String,
    pub kind: TransportKind,
}

impl ConnectionTarget {
    /// Derive the target from the `--url` value.
    ///
    /// Only the scheme prefix is inspected: `http`/`https` selects SSE,
    /// `ws`/`wss` selects WebSocket and anything else is treated as a
    /// WebSocket address with `ws://` prepended. Malformed URLs surface later
    /// when the transport endpoint is built.
    pub fn from_url_arg(url: Option<&str>) -> Self {
        let Some(url) = url else {
            return Self {
                server_url: DEFAULT_SERVER_URL.to_string(),
                kind: TransportKind::WebSocket,
            };
        };

        if url.starts_with("http") {
            Self {
                server_url: url.to_string(),
                kind: TransportKind::Sse,
            }
        } else if url.starts_with("ws") {
            Self {
                server_url: url.to_string(),
                kind: TransportKind::WebSocket,
            }
        } else {
            Self {
                server_url: format!("ws://{}", url),
                kind: TransportKind::WebSocket,
            }
        }
    }
}
