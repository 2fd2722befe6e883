//! Configuration loading and resolution
//!
//! Settings are resolved in priority order:
//! 1. Command-line argument / environment variable (applied by the binary)
//! 2. TOML config file
//! 3. Compiled defaults
//!
//! A missing config file is not an error: the service starts on defaults.
//! A config file that exists but cannot be parsed is.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::{Error, Result};

/// Name of the override document inside the data directory
pub const DEFAULT_OVERRIDES_FILE: &str = "overrides.json";

/// Service configuration as read from TOML
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding domains.json, overview.json and details.json
    pub data_dir: PathBuf,

    /// Override document; defaults to `<data_dir>/overrides.json`
    pub overrides_path: Option<PathBuf>,

    /// Address to bind the HTTP server to
    pub bind: String,

    /// HTTP server port
    pub port: u16,

    /// Directory of dashboard front-end files served at `/` and `/static`
    pub static_dir: Option<PathBuf>,

    /// Refuse to start when a listed domain has no detail record
    pub strict_integrity: bool,

    pub scoring: ScoringConfig,

    pub logging: LoggingConfig,
}

/// Accepted range for manually entered scores
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub min_score: f64,
    pub max_score: f64,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            overrides_path: None,
            bind: "0.0.0.0".to_string(),
            port: 8080,
            static_dir: None,
            strict_integrity: false,
            scoring: ScoringConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            min_score: 1.0,
            max_score: 5.0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl ScoringConfig {
    /// Finite and within `[min_score, max_score]`
    pub fn accepts(&self, score: f64) -> bool {
        score.is_finite() && score >= self.min_score && score <= self.max_score
    }
}

impl Config {
    /// Load configuration from an explicit path, or from the default
    /// location when `path` is `None`
    ///
    /// An explicitly named file must exist. The default location may be
    /// absent, in which case compiled defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    warn!("No config file found, using built-in defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml(&content)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let ScoringConfig {
            min_score,
            max_score,
        } = self.scoring;
        if !min_score.is_finite() || !max_score.is_finite() || min_score > max_score {
            return Err(Error::Config(format!(
                "Invalid score range [{}, {}]",
                min_score, max_score
            )));
        }
        Ok(())
    }

    /// Resolved override document path
    pub fn overrides_path(&self) -> PathBuf {
        self.overrides_path
            .clone()
            .unwrap_or_else(|| self.data_dir.join(DEFAULT_OVERRIDES_FILE))
    }

    /// `bind:port` socket address string
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

/// Platform config file location: `<config dir>/mmd/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("mmd").join("config.toml"))
}
