//! Configuration file support for the ledger.
//!
//! Configuration is loaded from `~/.config/ledger/config.toml` with the following precedence:
//! 1. CLI arguments (highest priority)
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values (lowest priority)
//!
//! # Example Configuration
//!
//! ```toml
//! # ~/.config/ledger/config.toml
//! ledger_file = "~/finance/transactions.csv"
//! log_dir = "~/.ledger/logs"
//! default_time = "09:00"
//! ```

use std::path::PathBuf;

use chrono::NaiveTime;
use serde::Deserialize;

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Flat file holding one transaction per line
    pub ledger_file: Option<PathBuf>,

    /// Directory for log files
    pub log_dir: Option<PathBuf>,

    /// Initial time shown by the entry form, `"now"` or `"HH:MM"`
    pub default_time: Option<String>,
}

impl Config {
    /// Load configuration from the default config file path.
    ///
    /// Returns default configuration if file doesn't exist or can't be parsed.
    pub fn load() -> Self {
        let config_path = Self::config_path();

        if !config_path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => Self::parse(&contents).unwrap_or_else(|e| {
                eprintln!("Warning: Failed to parse config file: {}", e);
                Self::default()
            }),
            Err(e) => {
                eprintln!("Warning: Failed to read config file: {}", e);
                Self::default()
            }
        }
    }

    /// Parse configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Get the default configuration file path.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ledger")
            .join("config.toml")
    }

    /// Merge with CLI and environment overrides.
    ///
    /// A CLI path beats `LEDGER_FILE`, which beats the config file.
    pub fn with_overrides(mut self, ledger_file: Option<PathBuf>) -> Self {
        let env_file = std::env::var_os("LEDGER_FILE").map(PathBuf::from);
        if let Some(path) = ledger_file.or(env_file) {
            self.ledger_file = Some(path);
        }
        self
    }

    /// Get the ledger file, falling back to the default location.
    pub fn ledger_file(&self) -> PathBuf {
        self.ledger_file
            .clone()
            .map(expand_home)
            .unwrap_or_else(|| home_dir().join(".ledger/transactions.csv"))
    }

    /// Get the log directory.
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .map(expand_home)
            .unwrap_or_else(|| home_dir().join(".ledger/logs"))
    }

    /// Get the time the entry form starts at.
    ///
    /// `None` (unset, `"now"` or not a valid `HH:MM`) means the local time
    /// when the form opens.
    pub fn default_time(&self) -> Option<NaiveTime> {
        self.default_time
            .as_deref()
            .filter(|t| *t != "now")
            .and_then(|t| NaiveTime::parse_from_str(t, "%H:%M").ok())
    }
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn expand_home(path: PathBuf) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => home_dir().join(rest),
        Err(_) => path,
    }
}
