use colored::*;
use serde_json::{json, Map, Value};
use std::io::Write;

use crate::error::Result;
use crate::llm::StructuredGenerator;
use crate::mcp::{McpTool, McpToolCall, ToolSession};
use crate::ui::output::default_as_text;
use crate::ui::{render_tool_result, tool_entry, Prompter};

/// Interactive tool invocation: pick a tool, collect its arguments by hand
/// or through the structured generator, call it and print the result.
///
/// The API key for generation lives here for the rest of the run once the
/// operator has entered it; it is never written to the process environment.
pub struct ToolTester {
    generator: Box<dyn StructuredGenerator>,
    api_key: Option<String>,
}

impl ToolTester {
    pub fn new(generator: Box<dyn StructuredGenerator>, api_key: Option<String>) -> Self {
        Self { generator, api_key }
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Run one test. Only prompt and listing failures are returned as
    /// errors; generation and invocation failures are reported to `out`.
    pub async fn run(
        &mut self,
        session: &mut dyn ToolSession,
        prompter: &mut dyn Prompter,
        out: &mut dyn Write,
    ) -> Result<()> {
        let tools = session.list_tools().await?;
        if tools.is_empty() {
            writeln!(out, "{}", "No tools available to test.".yellow())?;
            return Ok(());
        }

        let entries: Vec<String> = tools.iter().map(tool_entry).collect();
        let index = prompter.select("Select a tool to test", &entries)?;
        let Some(tool) = tools.get(index) else {
            return Err(format!("Invalid tool selection: {}", index).into());
        };

        let arguments = match tool.parameters() {
            None => json!({}),
            Some(params) => {
                if prompter.confirm("Use AI to generate parameters?", false)? {
                    match self.generate_arguments(tool, prompter, out).await? {
                        Some(arguments) => arguments,
                        None => return Ok(()),
                    }
                } else {
                    prompt_arguments(params, prompter)?
                }
            }
        };

        let tool_call = McpToolCall {
            name: tool.name.clone(),
            arguments,
        };
        tracing::debug!(tool = %tool_call.name, arguments = %tool_call.arguments, "calling tool");

        match session.call_tool(&tool_call).await {
            Ok(result) => {
                if result.is_error == Some(true) {
                    writeln!(out, "{}", "Tool reported an error:".red())?;
                }
                for line in render_tool_result(&result) {
                    writeln!(out, "{}", line)?;
                }
            }
            Err(e) => {
                writeln!(
                    out,
                    "{}",
                    format!("Error executing tool '{}': {}", tool.name, e).red()
                )?;
            }
        }

        Ok(())
    }

    /// Generated arguments, or `None` if generation failed (already reported).
    async fn generate_arguments(
        &mut self,
        tool: &McpTool,
        prompter: &mut dyn Prompter,
        out: &mut dyn Write,
    ) -> Result<Option<Value>> {
        let api_key = match self.api_key.clone() {
            Some(key) => key,
            None => {
                let key = prompter.secret("Enter your OpenAI API key")?;
                let key = key.trim().to_string();
                if key.is_empty() {
                    writeln!(
                        out,
                        "{}",
                        "An API key is required for AI parameter generation.".red()
                    )?;
                    return Ok(None);
                }
                self.api_key = Some(key.clone());
                key
            }
        };

        let instruction = prompter.input("Describe the parameters you want", None)?;
        let schema = tool.input_schema.clone().unwrap_or_else(|| json!({}));

        match self.generator.generate(&api_key, &schema, &instruction).await {
            Ok(arguments) => {
                writeln!(out, "{}", "Generated parameters:".cyan())?;
                writeln!(
                    out,
                    "{}",
                    serde_json::to_string_pretty(&arguments)?
                )?;
                Ok(Some(arguments))
            }
            Err(e) => {
                writeln!(
                    out,
                    "{}",
                    format!("Failed to generate parameters: {}", e).red()
                )?;
                Ok(None)
            }
        }
    }
}

/// Ask for each declared parameter as raw text. Values are kept as strings
/// whatever type the schema declares.
pub fn prompt_arguments(params: &Map<String, Value>, prompter: &mut dyn Prompter) -> Result<Value> {
    let mut arguments = Map::new();

    for (name, schema) in params {
        let description = schema
            .get("description")
            .and_then(|d| d.as_str())
            .unwrap_or("no description");
        let default = schema.get("default").map(default_as_text);

        let value = prompter.input(&format!("{} ({})", name, description), default.as_deref())?;
        arguments.insert(name.clone(), Value::String(value));
    }

    Ok(Value::Object(arguments))
}
