use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    /// May reference environment variables as `${VAR_NAME}`.
    #[serde(default)]
    pub api_key: Option<String>,
}
