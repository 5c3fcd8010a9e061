use crate::mcp::{McpTool, McpToolResult};
use serde_json::Value;

/// Descriptions longer than this are shortened in listings.
pub const DESCRIPTION_LIMIT: usize = 40;
/// Number of characters kept from a shortened description.
pub const DESCRIPTION_CUT: usize = 30;

/// Shorten a description for menus: longer than 40 characters becomes the
/// first 30 followed by `...`.
pub fn summarize_description(description: Option<&str>) -> String {
    let Some(description) = description else {
        return "No description".to_string();
    };

    if description.chars().count() > DESCRIPTION_LIMIT {
        let cut: String = description.chars().take(DESCRIPTION_CUT).collect();
        format!("{}...", cut)
    } else {
        description.to_string()
    }
}

/// `name - summary`, as shown in the selection menu.
pub fn tool_entry(tool: &McpTool) -> String {
    format!(
        "{} - {}",
        tool.name,
        summarize_description(tool.description.as_deref())
    )
}

/// Numbered listing lines, 1-based.
pub fn format_tool_list(tools: &[McpTool]) -> Vec<String> {
    tools
        .iter()
        .enumerate()
        .map(|(index, tool)| format!("{}. {}", index + 1, tool_entry(tool)))
        .collect()
}

/// Lines to print for a tool result. Array content yields the text of each
/// `"text"` item; any other content is shown as a single value.
pub fn render_tool_result(result: &McpToolResult) -> Vec<String> {
    match result.text_items() {
        Some(texts) => texts.into_iter().map(|t| t.to_string()).collect(),
        None => vec![render_value(&result.content)],
    }
}

/// Strings verbatim, everything else as pretty JSON.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

/// Schema default shown as the pre-filled answer of a manual prompt.
pub fn default_as_text(default: &Value) -> String {
    render_value(default)
}
