use async_trait::async_trait;
use jsonschema::JSONSchema;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use super::models::{Message, RequestBody, ResponseFormat};
use super::response::{extract_content, extract_refusal};
use crate::error::{ProbeError, Result};

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

const SYSTEM_PROMPT: &str = "You generate arguments for a tool call. \
Respond with a single JSON object that satisfies the provided schema and fulfils the user's request.";

/// Produces a JSON value conforming to a schema from a natural-language
/// instruction.
#[async_trait]
pub trait StructuredGenerator: Send + Sync {
    async fn generate(&self, api_key: &str, schema: &Value, instruction: &str) -> Result<Value>;
}

/// Structured generation over an OpenAI-compatible chat completions endpoint.
/// One HTTP client is shared by every request of the session.
pub struct ChatCompletionsGenerator {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

impl ChatCompletionsGenerator {
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            model: model.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl Default for ChatCompletionsGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT, DEFAULT_MODEL)
    }
}

#[async_trait]
impl StructuredGenerator for ChatCompletionsGenerator {
    async fn generate(&self, api_key: &str, schema: &Value, instruction: &str) -> Result<Value> {
        let request_body = RequestBody {
            model: self.model.clone(),
            messages: vec![Message::system(SYSTEM_PROMPT), Message::user(instruction)],
            response_format: ResponseFormat::json_schema("tool_parameters", schema.clone()),
        };

        tracing::debug!(model = %self.model, endpoint = %self.endpoint, "requesting structured generation");
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .header(CONTENT_TYPE, "application/json")
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProbeError::Api { status, message });
        }

        let response_json: Value = response.json().await?;
        tracing::trace!(response = %response_json, "structured generation response");

        if let Some(refusal) = extract_refusal(&response_json) {
            return Err(ProbeError::Generation(format!("Model refused: {}", refusal)));
        }

        let content = extract_content(&response_json)?
            .ok_or_else(|| ProbeError::Generation("Response has no content".to_string()))?;

        parse_generated(&content, schema)
    }
}

/// Parse model output into an argument object and check it against the
/// tool's schema.
pub fn parse_generated(content: &str, schema: &Value) -> Result<Value> {
    let value: Value = serde_json::from_str(content.trim())
        .map_err(|e| ProbeError::Generation(format!("Model output is not valid JSON: {}", e)))?;

    if !value.is_object() {
        return Err(ProbeError::Generation(
            "Model output is not a JSON object".to_string(),
        ));
    }

    validate_against_schema(schema, &value)?;
    Ok(value)
}

pub fn validate_against_schema(schema: &Value, instance: &Value) -> Result<()> {
    let compiled = JSONSchema::compile(schema)
        .map_err(|e| ProbeError::Generation(format!("Invalid tool schema: {}", e)))?;

    if let Err(errors) = compiled.validate(instance) {
        let error_messages: Vec<String> = errors
            .map(|e| format!("{}: {}", e.instance_path, e))
            .collect();
        return Err(ProbeError::Generation(format!(
            "Generated parameters do not match schema: {}",
            error_messages.join("; ")
        )));
    }

    Ok(())
}
