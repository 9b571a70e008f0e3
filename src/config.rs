//! Configuration module for PLAYVAULT.

use serde::Deserialize;
use std::path::Path;

use crate::{Result, VaultError};

/// Storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the save slots.
    #[serde(default = "default_storage_path")]
    pub path: String,
}

fn default_storage_path() -> String {
    "data/save".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/playvault.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Display configuration for the console.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Timezone for displaying dates (e.g., "Asia/Ho_Chi_Minh", "UTC").
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
        }
    }
}

/// Development test account, seeded at startup when enabled.
#[derive(Debug, Clone, Deserialize)]
pub struct TestAccountConfig {
    /// Whether to create the test account if it does not exist.
    #[serde(default = "default_test_account_enabled")]
    pub enabled: bool,
    /// Test account username.
    #[serde(default = "default_test_username")]
    pub username: String,
    /// Test account password.
    #[serde(default = "default_test_password")]
    pub password: String,
}

fn default_test_account_enabled() -> bool {
    true
}

fn default_test_username() -> String {
    "admin".to_string()
}

fn default_test_password() -> String {
    "admin123".to_string()
}

impl Default for TestAccountConfig {
    fn default() -> Self {
        Self {
            enabled: default_test_account_enabled(),
            username: default_test_username(),
            password: default_test_password(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Display settings.
    #[serde(default)]
    pub display: DisplayConfig,
    /// Development test account settings.
    #[serde(default)]
    pub test_account: TestAccountConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(VaultError::Io)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| VaultError::Config(format!("config parse error: {e}")))
    }
}
