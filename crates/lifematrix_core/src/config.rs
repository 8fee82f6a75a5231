//! Runtime configuration for hosts embedding the core (FFI, CLI).
//!
//! # Responsibility
//! - Resolve share origin, share database path and logging settings.
//! - Validate values once so callers can trust them.
//!
//! # Invariants
//! - `origin` is an `http(s)://host[:port]` origin without path or query.
//! - `log_dir`, when set, is absolute.

use crate::logging::{default_log_level, normalize_level};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const ENV_ORIGIN: &str = "LIFEMATRIX_ORIGIN";
pub const ENV_DB_PATH: &str = "LIFEMATRIX_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "LIFEMATRIX_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "LIFEMATRIX_LOG_DIR";

pub const DEFAULT_ORIGIN: &str = "http://localhost:5173";
const DEFAULT_DB_FILE_NAME: &str = "lifematrix_shares.sqlite3";

static ORIGIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://[A-Za-z0-9.-]+(:[0-9]{1,5})?$").expect("valid origin regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidOrigin(String),
    InvalidLogLevel(String),
    RelativeLogDir(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidOrigin(value) => write!(
                f,
                "{ENV_ORIGIN} must look like `https://host[:port]`, got `{value}`"
            ),
            Self::InvalidLogLevel(message) => write!(f, "{ENV_LOG_LEVEL}: {message}"),
            Self::RelativeLogDir(value) => {
                write!(f, "{ENV_LOG_DIR} must be an absolute path, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

/// Resolved host configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixConfig {
    pub origin: String,
    pub db_path: PathBuf,
    pub log_level: &'static str,
    /// File logging is enabled only when set.
    pub log_dir: Option<PathBuf>,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl MatrixConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(origin) = read(ENV_ORIGIN) {
            config.origin = normalize_origin(&origin)?;
        }
        if let Some(db_path) = read(ENV_DB_PATH) {
            config.db_path = PathBuf::from(db_path);
        }
        if let Some(level) = read(ENV_LOG_LEVEL) {
            config.log_level = normalize_level(&level).map_err(ConfigError::InvalidLogLevel)?;
        }
        if let Some(log_dir) = read(ENV_LOG_DIR) {
            if !Path::new(&log_dir).is_absolute() {
                return Err(ConfigError::RelativeLogDir(log_dir));
            }
            config.log_dir = Some(PathBuf::from(log_dir));
        }

        Ok(config)
    }
}

/// Validates an origin and strips one trailing `/`.
pub fn normalize_origin(value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    let candidate = trimmed.strip_suffix('/').unwrap_or(trimmed);
    if !ORIGIN_RE.is_match(candidate) {
        return Err(ConfigError::InvalidOrigin(trimmed.to_string()));
    }
    Ok(candidate.to_string())
}
