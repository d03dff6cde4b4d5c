//! Cursor and logging settings, loadable from TOML.
//!
//! ```toml
//! [cursor]
//! page_size = 250
//! validate_query = true
//!
//! [logging]
//! level = "debug"
//! ```

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::types::DEFAULT_PAGE_SIZE;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Page size must be at least 1, got {0}")]
    InvalidPageSize(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    /// Rows requested per `LIMIT/OFFSET` execution.
    pub page_size: usize,
    /// Reject base queries that are not a single `SELECT` without its own
    /// `LIMIT/OFFSET` before anything reaches the backend.
    pub validate_query: bool,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            validate_query: true,
        }
    }
}

impl CursorConfig {
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::InvalidPageSize(self.page_size));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub level: String,
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            with_target: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShimConfig {
    pub cursor: CursorConfig,
    pub logging: LoggingConfig,
}

impl ShimConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: ShimConfig = toml::from_str(contents)?;
        config.cursor.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}
