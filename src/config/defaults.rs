pub use crate::llm::generator::{DEFAULT_ENDPOINT, DEFAULT_MODEL};

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const MODEL_ENV: &str = "MCP_PROBE_MODEL";
pub const ENDPOINT_ENV: &str = "MCP_PROBE_API_ENDPOINT";
pub const VERBOSE_ENV: &str = "MCP_PROBE_VERBOSE";

pub const EXAMPLE_CONFIG: &str = r#"# mcp-probe configuration
llm:
  # OpenAI-compatible chat completions endpoint used for AI parameter generation
  endpoint: https://api.openai.com/v1
  model: gpt-4o-mini
  # api_key: ${OPENAI_API_KEY}
session:
  verbose: false
"#;

pub fn is_truthy(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes")
}
