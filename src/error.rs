use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Invalid server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Server error {code}: {message}")]
    Server { code: i64, message: String },

    #[error("Connection closed by server")]
    ConnectionClosed,

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl From<dialoguer::Error> for ProbeError {
    fn from(err: dialoguer::Error) -> Self {
        ProbeError::Prompt(err.to_string())
    }
}

impl From<String> for ProbeError {
    fn from(msg: String) -> Self {
        ProbeError::Other(msg)
    }
}

impl From<&str> for ProbeError {
    fn from(msg: &str) -> Self {
        ProbeError::Other(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ProbeError>;
