use clap::Parser;
use colored::*;
use std::env;
use std::io;
use std::process;
use tracing_subscriber::EnvFilter;

use mcp_probe::cli::{Args, ConnectionTarget};
use mcp_probe::config::{Config, FileConfig};
use mcp_probe::llm::ChatCompletionsGenerator;
use mcp_probe::mcp::{self, McpClient};
use mcp_probe::menu::run_menu;
use mcp_probe::tester::ToolTester;
use mcp_probe::ui::TerminalPrompter;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Handle --config-init option
    if args.config_init {
        match FileConfig::init_user_config() {
            Ok(path) => {
                println!(
                    "{}",
                    format!("Config file written to {}", path.display()).green()
                );
                return;
            }
            Err(e) => {
                eprintln!("{} {:#}", "Error:".red(), e);
                process::exit(1);
            }
        }
    }

    // Load configuration; a broken config file is not fatal
    let (file_config, load_error) = match FileConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (FileConfig::default(), Some(e)),
    };
    let config = Config::from_sources(&args, file_config, |key| env::var(key).ok());

    init_logging(config.verbose);
    if let Some(e) = load_error {
        tracing::warn!("{:#}; using defaults", e);
    }
    tracing::debug!(model = %config.model, endpoint = %config.api_endpoint, "configuration loaded");

    let target = ConnectionTarget::from_url_arg(args.url.as_deref());
    println!(
        "{}",
        format!("Connecting to {} ({})...", target.server_url, target.kind).cyan()
    );

    let transport = match mcp::connect(&target).await {
        Ok(transport) => transport,
        Err(e) => {
            eprintln!("{} {}", "Failed to connect:".red(), e);
            process::exit(1);
        }
    };

    let mut client = match McpClient::connect(transport).await {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{} {}", "Failed to connect:".red(), e);
            process::exit(1);
        }
    };

    let server_info = client.server_info();
    println!(
        "{}",
        format!(
            "Connected to MCP server: {} v{}",
            server_info.name, server_info.version
        )
        .green()
    );

    let generator = ChatCompletionsGenerator::new(config.api_endpoint.clone(), config.model.clone());
    let mut tester = ToolTester::new(Box::new(generator), config.api_key.clone());
    let mut prompter = TerminalPrompter::new();
    let mut stdout = io::stdout();

    let outcome = run_menu(&mut client, &mut tester, &mut prompter, &mut stdout).await;

    // Close on every path, before the process exits
    if let Err(e) = client.close().await {
        tracing::warn!(error = %e, "failed to close transport");
    }

    if let Err(e) = outcome {
        eprintln!("{} {}", "Error:".red(), e);
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "warn,mcp_probe=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
