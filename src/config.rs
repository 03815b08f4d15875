use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::cli::Cli;

pub const DEFAULT_API_BASE: &str = "https://api.trello.com/1";

/// Values read from the optional config file. Anything given on the command
/// line or through the environment takes precedence.
#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct FileConfig {
    pub api_key: Option<String>,
    pub token: Option<String>,
    pub board_id: Option<String>,
    pub api_base: Option<String>,
}

/// Credentials and board for one run. Built once at startup and never mutated.
#[derive(Clone, PartialEq)]
pub struct LinkConfig {
    pub api_key: String,
    pub token: String,
    pub board_id: String,
    pub api_base: String,
}

impl fmt::Debug for LinkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkConfig")
            .field("api_key", &"<redacted>")
            .field("token", &"<redacted>")
            .field("board_id", &self.board_id)
            .field("api_base", &self.api_base)
            .finish()
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".trello-branch-link")
        .join("config.toml")
}

pub fn load_file_config(path: &Path) -> Result<FileConfig> {
    if !path.exists() {
        return Ok(FileConfig::default());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: FileConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(config)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// A flag or environment value that is set but blank does not hide the file.
fn pick(flag: &Option<String>, file: Option<String>) -> Option<String> {
    non_blank(flag.clone()).or_else(|| non_blank(file))
}

/// Merge command-line/environment values over the config file. Fails when a
/// required input is missing, before anything touches the network.
pub fn resolve(cli: &Cli, file: FileConfig) -> Result<LinkConfig> {
    let Some(api_key) = pick(&cli.api_key, file.api_key) else {
        bail!("Missing Trello API key (--api-key, TRELLO_API_KEY or api_key in config)");
    };
    let Some(token) = pick(&cli.token, file.token) else {
        bail!("Missing Trello auth token (--token, TRELLO_AUTH_TOKEN or token in config)");
    };
    let Some(board_id) = pick(&cli.board_id, file.board_id) else {
        bail!("Missing Trello board id (--board-id, TRELLO_BOARD_ID or board_id in config)");
    };
    let api_base =
        pick(&cli.api_base, file.api_base).unwrap_or_else(|| DEFAULT_API_BASE.to_string());

    Ok(LinkConfig {
        api_key,
        token,
        board_id,
        api_base,
    })
}

pub fn load_config(cli: &Cli) -> Result<LinkConfig> {
    let path = cli.config.clone().unwrap_or_else(default_config_path);
    let file = load_file_config(&path)?;
    resolve(cli, file)
}
