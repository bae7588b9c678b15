//! Runtime configuration for services embedding the core.
//!
//! # Responsibility
//! - Hold the database path, logging settings and default page size.
//! - Load overrides from `CRUDKIT_*` environment variables.
//!
//! # Invariants
//! - A loaded config always has a non-zero default limit.

use crate::logging::default_log_level;
use crate::query::{QueryParams, DEFAULT_LIMIT};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "CRUDKIT_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "CRUDKIT_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "CRUDKIT_LOG_DIR";
pub const ENV_DEFAULT_LIMIT: &str = "CRUDKIT_DEFAULT_LIMIT";

const DEFAULT_DB_FILE_NAME: &str = "crudkit.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "crudkit-logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: PathBuf,
    pub default_limit: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLimit { var: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLimit { var, value } => {
                write!(f, "{var} must be a positive integer, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME),
            default_limit: DEFAULT_LIMIT,
        }
    }
}

impl CoreConfig {
    /// Loads the config from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads the config through `lookup`; unset or blank keys keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(path) = get(ENV_DB_PATH) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = get(ENV_LOG_LEVEL) {
            config.log_level = level;
        }
        if let Some(dir) = get(ENV_LOG_DIR) {
            config.log_dir = PathBuf::from(dir);
        }
        if let Some(raw) = get(ENV_DEFAULT_LIMIT) {
            config.default_limit = match raw.parse::<u32>() {
                Ok(limit) if limit > 0 => limit,
                _ => {
                    return Err(ConfigError::InvalidLimit {
                        var: ENV_DEFAULT_LIMIT,
                        value: raw,
                    })
                }
            };
        }

        Ok(config)
    }

    /// List params used when a request carries none.
    pub fn default_query(&self) -> QueryParams {
        QueryParams::with_default_limit(self.default_limit)
    }
}
