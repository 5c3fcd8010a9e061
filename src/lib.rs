pub mod cli;
pub mod config;
pub mod error;
pub mod lister;
pub mod llm;
pub mod mcp;
pub mod menu;
pub mod tester;
pub mod ui;
