//! Centralized path utilities
//!
//! All application paths in one place for consistency

use std::path::PathBuf;

/// Get the marquee config directory (~/.marquee)
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".marquee")
}

/// Get the logs directory (~/.marquee/logs)
pub fn logs_dir() -> PathBuf {
    config_dir().join("logs")
}

/// Get the config file path (~/.marquee/config.toml)
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}
