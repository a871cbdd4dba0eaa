//! # Configuration
//!
//! Environment configuration for the bot binary and YAML configuration for
//! the bundled components (help and eval).
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Components YAML with serde defaults
//! - 1.0.0: Environment configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::docparse::DocStyle;

/// Runtime configuration read from the environment
#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub discord_guild_id: Option<String>,
    pub log_level: String,
    pub owner_ids: HashSet<u64>,
    /// `None` auto-detects the style of every docstring
    pub doc_style: Option<DocStyle>,
    pub components_config_path: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let discord_token =
            std::env::var("DISCORD_TOKEN").context("DISCORD_TOKEN environment variable not set")?;

        let discord_guild_id = std::env::var("DISCORD_GUILD_ID")
            .ok()
            .filter(|id| !id.trim().is_empty());

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let owner_ids = std::env::var("OWNER_IDS")
            .map(|ids| parse_id_list(&ids))
            .unwrap_or_default();

        let doc_style = match std::env::var("DOC_STYLE") {
            Ok(tag) if !tag.trim().is_empty() => Some(tag.parse::<DocStyle>()?),
            _ => None,
        };

        let components_config_path = std::env::var("COMPONENTS_CONFIG_PATH")
            .unwrap_or_else(|_| "components.yaml".to_string());

        Ok(Config {
            discord_token,
            discord_guild_id,
            log_level,
            owner_ids,
            doc_style,
            components_config_path,
        })
    }
}

/// Parse a comma separated list of snowflakes, skipping anything unparsable
pub fn parse_id_list(raw: &str) -> HashSet<u64> {
    raw.split(',')
        .filter_map(|id| id.trim().parse::<u64>().ok())
        .collect()
}

/// Settings for the bundled components
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ComponentsConfig {
    #[serde(default)]
    pub help: HelpConfig,
    #[serde(default)]
    pub eval: EvalConfig,
}

impl ComponentsConfig {
    /// Load component configuration from a YAML file
    pub fn load(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: ComponentsConfig = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the file when it exists, otherwise fall back to the defaults
    pub fn load_or_default(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.help.page_size == 0 {
            return Err(anyhow::anyhow!("help.page_size must be at least 1"));
        }
        if self.eval.interpreter.trim().is_empty() {
            return Err(anyhow::anyhow!("eval.interpreter must not be empty"));
        }
        if self.eval.timeout_seconds == 0 {
            return Err(anyhow::anyhow!("eval.timeout_seconds must be at least 1"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HelpConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// List commands without a help override using their docstring summary
    #[serde(default = "default_true")]
    pub include_undocumented: bool,

    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for HelpConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            include_undocumented: true,
            page_size: default_page_size(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EvalConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Guilds the eval command is declared in. `None` declares it globally.
    #[serde(default = "default_eval_guilds")]
    pub eval_guild_ids: Option<Vec<u64>>,

    /// Interpreter binary the code is handed to
    #[serde(default = "default_interpreter")]
    pub interpreter: String,

    /// Arguments placed before the code
    #[serde(default = "default_interpreter_args")]
    pub args: Vec<String>,

    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Captured output beyond this is cut off per stream
    #[serde(default = "default_max_output")]
    pub max_output_bytes: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            eval_guild_ids: default_eval_guilds(),
            interpreter: default_interpreter(),
            args: default_interpreter_args(),
            timeout_seconds: default_timeout(),
            max_output_bytes: default_max_output(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_page_size() -> usize {
    10
}

fn default_eval_guilds() -> Option<Vec<u64>> {
    Some(Vec::new())
}

fn default_interpreter() -> String {
    "sh".to_string()
}

fn default_interpreter_args() -> Vec<String> {
    vec!["-c".to_string()]
}

fn default_timeout() -> u64 {
    30
}

fn default_max_output() -> usize {
    64 * 1024
}
