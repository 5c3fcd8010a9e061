#![allow(dead_code)]

pub mod http;

use async_trait::async_trait;
use mcp_probe::error::{ProbeError, Result};
use mcp_probe::llm::StructuredGenerator;
use mcp_probe::mcp::{McpTool, McpToolCall, McpToolResult, ToolSession};
use mcp_probe::ui::Prompter;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub fn tool(name: &str, description: Option<&str>, input_schema: Option<Value>) -> McpTool {
    McpTool {
        name: name.to_string(),
        description: description.map(|d| d.to_string()),
        input_schema,
    }
}

/// In-memory session returning canned results and recording calls.
pub struct FakeSession {
    pub tools: Vec<McpTool>,
    pub results: VecDeque<Result<McpToolResult>>,
    pub calls: Vec<McpToolCall>,
    pub list_count: usize,
}

impl FakeSession {
    pub fn new(tools: Vec<McpTool>) -> Self {
        Self {
            tools,
            results: VecDeque::new(),
            calls: Vec::new(),
            list_count: 0,
        }
    }

    pub fn with_result(mut self, content: Value) -> Self {
        self.results.push_back(Ok(McpToolResult {
            content,
            is_error: None,
        }));
        self
    }

    pub fn with_error(mut self, message: &str) -> Self {
        self.results.push_back(Err(ProbeError::Server {
            code: -32603,
            message: message.to_string(),
        }));
        self
    }
}

#[async_trait]
impl ToolSession for FakeSession {
    async fn list_tools(&mut self) -> Result<Vec<McpTool>> {
        self.list_count += 1;
        Ok(self.tools.clone())
    }

    async fn call_tool(&mut self, tool_call: &McpToolCall) -> Result<McpToolResult> {
        self.calls.push(tool_call.clone());
        self.results.pop_front().unwrap_or_else(|| {
            Ok(McpToolResult {
                content: json!([]),
                is_error: None,
            })
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    Select(usize),
    Input(String),
    Confirm(bool),
    Secret(String),
}

/// Prompter answering from a script. Records the prompts and defaults it saw.
#[derive(Default)]
pub struct ScriptedPrompter {
    pub answers: VecDeque<Answer>,
    pub input_prompts: Vec<(String, Option<String>)>,
    pub select_items: Vec<Vec<String>>,
    pub secret_prompts: usize,
}

impl ScriptedPrompter {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: answers.into(),
            ..Default::default()
        }
    }

    fn next(&mut self, kind: &str) -> Answer {
        self.answers
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted answer left for {}", kind))
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&mut self, _prompt: &str, items: &[String]) -> Result<usize> {
        self.select_items.push(items.to_vec());
        match self.next("select") {
            Answer::Select(index) => Ok(index),
            other => panic!("expected select answer, got {:?}", other),
        }
    }

    fn input(&mut self, prompt: &str, default: Option<&str>) -> Result<String> {
        self.input_prompts
            .push((prompt.to_string(), default.map(|d| d.to_string())));
        match self.next("input") {
            Answer::Input(value) => Ok(value),
            other => panic!("expected input answer, got {:?}", other),
        }
    }

    fn confirm(&mut self, _prompt: &str, _default: bool) -> Result<bool> {
        match self.next("confirm") {
            Answer::Confirm(value) => Ok(value),
            other => panic!("expected confirm answer, got {:?}", other),
        }
    }

    fn secret(&mut self, _prompt: &str) -> Result<String> {
        self.secret_prompts += 1;
        match self.next("secret") {
            Answer::Secret(value) => Ok(value),
            other => panic!("expected secret answer, got {:?}", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerationCall {
    pub api_key: String,
    pub schema: Value,
    pub instruction: String,
}

/// Generator returning a fixed value (or error) and recording its inputs.
pub struct FakeGenerator {
    pub output: std::result::Result<Value, String>,
    pub calls: Arc<Mutex<Vec<GenerationCall>>>,
}

impl FakeGenerator {
    pub fn returning(output: Value) -> (Self, Arc<Mutex<Vec<GenerationCall>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                output: Ok(output),
                calls: calls.clone(),
            },
            calls,
        )
    }

    pub fn failing(message: &str) -> (Self, Arc<Mutex<Vec<GenerationCall>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                output: Err(message.to_string()),
                calls: calls.clone(),
            },
            calls,
        )
    }
}

#[async_trait]
impl StructuredGenerator for FakeGenerator {
    async fn generate(&self, api_key: &str, schema: &Value, instruction: &str) -> Result<Value> {
        self.calls.lock().unwrap().push(GenerationCall {
            api_key: api_key.to_string(),
            schema: schema.clone(),
            instruction: instruction.to_string(),
        });
        self.output
            .clone()
            .map_err(|message| ProbeError::Api {
                status: 401,
                message,
            })
    }
}

/// Output captured as plain text lines.
pub fn lines(out: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(out)
        .lines()
        .map(|line| line.to_string())
        .collect()
}

pub fn no_color() {
    colored::control::set_override(false);
}
