//! Process configuration read from the environment.
//!
//! # Responsibility
//! - Resolve database path, storage key, logging and autosave settings.
//! - Reject malformed values instead of silently falling back.
//!
//! # Invariants
//! - Unset or blank variables take their defaults.
//! - Reading configuration has no side effects.

use crate::autosave::DEFAULT_AUTOSAVE_DELAY;
use crate::logging::default_log_level;
use crate::persist::DEFAULT_STORAGE_KEY;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_DB_PATH: &str = "SJED_DB_PATH";
pub const ENV_STORAGE_KEY: &str = "SJED_STORAGE_KEY";
pub const ENV_LOG_LEVEL: &str = "SJED_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "SJED_LOG_DIR";
pub const ENV_AUTOSAVE_MS: &str = "SJED_AUTOSAVE_MS";

const DEFAULT_DB_FILE_NAME: &str = "sjed_case.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "sjed-logs";
const MAX_AUTOSAVE_MS: u64 = 60_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but its value cannot be used.
    InvalidValue {
        var: &'static str,
        value: String,
        reason: &'static str,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { var, value, reason } => {
                write!(f, "invalid {var}=`{value}`: {reason}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Settings shared by every embedding of the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub storage_key: String,
    pub log_level: String,
    /// Absolute directory for rolling log files.
    pub log_dir: PathBuf,
    pub autosave_delay: Duration,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            log_level: default_log_level().to_string(),
            log_dir: std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME),
            autosave_delay: DEFAULT_AUTOSAVE_DELAY,
        }
    }
}

impl CoreConfig {
    /// Reads `SJED_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |var: &str| {
            lookup(var)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };
        let mut config = Self::default();

        if let Some(path) = read(ENV_DB_PATH) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(key) = read(ENV_STORAGE_KEY) {
            config.storage_key = key;
        }
        if let Some(level) = read(ENV_LOG_LEVEL) {
            config.log_level = level;
        }
        if let Some(dir) = read(ENV_LOG_DIR) {
            let path = PathBuf::from(&dir);
            if !path.is_absolute() {
                return Err(ConfigError::InvalidValue {
                    var: ENV_LOG_DIR,
                    value: dir,
                    reason: "must be an absolute path",
                });
            }
            config.log_dir = path;
        }
        if let Some(raw) = read(ENV_AUTOSAVE_MS) {
            config.autosave_delay = parse_autosave_ms(raw)?;
        }
        Ok(config)
    }
}

fn parse_autosave_ms(raw: String) -> Result<Duration, ConfigError> {
    match raw.parse::<u64>() {
        Ok(ms) if (1..=MAX_AUTOSAVE_MS).contains(&ms) => Ok(Duration::from_millis(ms)),
        Ok(_) => Err(ConfigError::InvalidValue {
            var: ENV_AUTOSAVE_MS,
            value: raw,
            reason: "expected 1..=60000 milliseconds",
        }),
        Err(_) => Err(ConfigError::InvalidValue {
            var: ENV_AUTOSAVE_MS,
            value: raw,
            reason: "expected an integer",
        }),
    }
}
