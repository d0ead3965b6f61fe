use crate::chat::DEFAULT_BOT_NAME;
use crate::hangman::{DEFAULT_MAX_WRONG_GUESSES, DEFAULT_WORDS};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming a config file when no `--config` flag is given
pub const CONFIG_ENV: &str = "CONFIG_FILE";

/// Main configuration structure. Every section is optional in the file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub portfolio: PortfolioConfig,
    pub chat: ChatConfig,
    pub hangman: HangmanConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// "pretty" or "json"
    pub output: String,
    /// Empty means stderr
    pub file_path: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            output: "pretty".to_string(),
            file_path: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PortfolioConfig {
    /// Directory export files are written into
    pub export_dir: PathBuf,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            export_dir: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub bot_name: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            bot_name: DEFAULT_BOT_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HangmanConfig {
    pub words: Vec<String>,
    pub max_wrong_guesses: usize,
}

impl Default for HangmanConfig {
    fn default() -> Self {
        Self {
            words: DEFAULT_WORDS.iter().map(|w| w.to_string()).collect(),
            max_wrong_guesses: DEFAULT_MAX_WRONG_GUESSES,
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load from an explicit path, else `CONFIG_FILE`, else built-in defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.is_empty() => Self::from_file(path),
            _ => Ok(Self::default()),
        }
    }
}
