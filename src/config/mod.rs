mod defaults;
mod llm;
mod validation;

use crate::cli::Args;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use defaults::{
    is_truthy, API_KEY_ENV, DEFAULT_ENDPOINT, DEFAULT_MODEL, ENDPOINT_ENV, EXAMPLE_CONFIG,
    MODEL_ENV, VERBOSE_ENV,
};
pub use llm::LlmConfig;
pub use validation::{expand_env_var_in_string, has_unexpanded_var};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub verbose: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FileConfig {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Credential for AI parameter generation. When absent the operator is
    /// asked for it on first use.
    pub api_key: Option<String>,
    pub api_endpoint: String,
    pub model: String,
    pub verbose: bool,
}

impl Config {
    /// Resolve settings with priority CLI args > env vars > config file > defaults.
    pub fn from_sources(
        args: &Args,
        file_config: FileConfig,
        env_lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        // Get API key: env var > config file (with ${VAR} expansion)
        let api_key = env_lookup(API_KEY_ENV)
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                file_config
                    .llm
                    .api_key
                    .as_deref()
                    .map(expand_env_var_in_string)
                    .filter(|key| !has_unexpanded_var(key) && !key.trim().is_empty())
            });

        // Get API endpoint: CLI args > env var > config file > default
        let api_endpoint = args
            .api_endpoint
            .clone()
            .or_else(|| env_lookup(ENDPOINT_ENV))
            .or(file_config.llm.endpoint)
            .map(|endpoint| normalize_endpoint(&endpoint))
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        // Get model: CLI args > env var > config file > default
        let model = args
            .model
            .clone()
            .or_else(|| env_lookup(MODEL_ENV))
            .or(file_config.llm.model)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        // Get verbose flag: CLI args > env var > config file > default
        let verbose = args.verbose
            || env_lookup(VERBOSE_ENV)
                .map(|v| is_truthy(&v))
                .or(file_config.session.verbose)
                .unwrap_or(false);

        Config {
            api_key,
            api_endpoint,
            model,
            verbose,
        }
    }
}

/// Append `/chat/completions` to an API base URL where needed.
pub fn normalize_endpoint(endpoint: &str) -> String {
    if endpoint.ends_with("/chat/completions") {
        endpoint.to_string()
    } else if endpoint.ends_with("/v1") {
        format!("{}/chat/completions", endpoint)
    } else if endpoint.ends_with("/v1/") {
        format!("{}chat/completions", endpoint)
    } else {
        // Assume it's a base URL without /v1
        format!("{}/v1/chat/completions", endpoint.trim_end_matches('/'))
    }
}

impl FileConfig {
    pub fn load() -> Result<Self> {
        for path in Self::get_config_paths() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        // No config file found, return default
        Ok(FileConfig::default())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|s| s.to_str());
        let config = if matches!(extension, Some("yaml") | Some("yml")) {
            serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse YAML config file: {}", path.display()))?
        } else {
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON config file: {}", path.display()))?
        };

        Ok(config)
    }

    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            // Current directory (highest priority - local override)
            PathBuf::from(".mcp-probe.yaml"),
            PathBuf::from(".mcp-probe.yml"),
            PathBuf::from(".mcp-probe.json"),
        ];

        // User's config directory (global config)
        if let Some(config_dir) = Self::user_config_dir() {
            paths.push(config_dir.join("mcp-probe.yaml"));
            paths.push(config_dir.join("mcp-probe.yml"));
            paths.push(config_dir.join("mcp-probe.json"));
        }

        paths
    }

    fn user_config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("mcp-probe"))
    }

    /// Write the example config to the user config directory.
    pub fn init_user_config() -> Result<PathBuf> {
        let config_dir = Self::user_config_dir().context("Could not determine home directory")?;
        let path = config_dir.join("mcp-probe.yaml");
        write_example_config(&path)?;
        Ok(path)
    }
}

/// Write the example config to `path`, refusing to overwrite an existing file.
pub fn write_example_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("Config file already exists: {}", path.display());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, EXAMPLE_CONFIG)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;
    Ok(())
}
