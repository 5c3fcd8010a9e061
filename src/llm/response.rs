use crate::error::{ProbeError, Result};
use serde_json::Value;

/// Extract content from a non-streaming chat completion response
pub fn extract_content(response_json: &Value) -> Result<Option<String>> {
    let choices = response_json
        .get("choices")
        .and_then(|c| c.as_array())
        .ok_or_else(|| ProbeError::Generation("No choices in response".to_string()))?;

    let first_choice = choices
        .first()
        .ok_or_else(|| ProbeError::Generation("Empty choices array".to_string()))?;

    let message = first_choice
        .get("message")
        .ok_or_else(|| ProbeError::Generation("No message in response".to_string()))?;

    Ok(message
        .get("content")
        .and_then(|c| c.as_str())
        .map(|s| s.to_string()))
}

/// Refusal text, when the model declined to produce structured output
pub fn extract_refusal(response_json: &Value) -> Option<String> {
    response_json
        .get("choices")?
        .as_array()?
        .first()?
        .get("message")?
        .get("refusal")?
        .as_str()
        .map(|s| s.to_string())
}
