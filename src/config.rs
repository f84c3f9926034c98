//! Configuration management
//!
//! This module handles loading configuration from:
//! - Command-line arguments (override, see [`crate::cli`])
//! - Configuration files (TOML)
//! - Defaults

use crate::codec::{Codepoint, MAX_CODEPOINT, MIN_CODEPOINT};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub automaton: AutomatonConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

/// Automaton construction settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutomatonConfig {
    /// Lowest codepoint kept when expanding transitions into symbols
    #[serde(default = "default_min")]
    pub min: Codepoint,

    /// Highest codepoint kept when expanding transitions into symbols
    #[serde(default = "default_max")]
    pub max: Codepoint,

    /// Minimize compiled patterns
    #[serde(default = "default_minimize")]
    pub minimize: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// DOT export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Graphviz layout direction
    #[serde(default = "default_rankdir")]
    pub rankdir: String,
}

// Default value functions

fn default_min() -> Codepoint {
    MIN_CODEPOINT
}

fn default_max() -> Codepoint {
    MAX_CODEPOINT
}

fn default_minimize() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_rankdir() -> String {
    "LR".to_string()
}

// Default implementations

impl Default for AutomatonConfig {
    fn default() -> Self {
        Self {
            min: default_min(),
            max: default_max(),
            minimize: default_minimize(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            rankdir: default_rankdir(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| Error::Config(format!("Failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config file {:?}: {}", path, e)))?;
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from default locations
    ///
    /// Searches in order:
    /// 1. ./cp-automaton.toml
    /// 2. ~/.cp-automaton/config.toml
    /// 3. /etc/cp-automaton/config.toml
    pub fn load() -> Result<Self> {
        let mut paths = vec![PathBuf::from("cp-automaton.toml")];
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".cp-automaton").join("config.toml"));
        }
        paths.push(PathBuf::from("/etc/cp-automaton/config.toml"));

        for path in paths {
            if path.exists() {
                tracing::info!("Loading config from {:?}", path);
                return Self::from_file(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Config::default())
    }

    /// Reject clamps that no codepoint satisfies
    pub fn validate(&self) -> Result<()> {
        let AutomatonConfig { min, max, .. } = self.automaton;
        if min > max || min > MAX_CODEPOINT {
            return Err(Error::Config(format!(
                "Empty codepoint range [{}, {}] (codepoints go up to {})",
                min, max, MAX_CODEPOINT
            )));
        }
        Ok(())
    }
}
