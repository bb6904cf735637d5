//! # Configuration State
//!
//! Settings read once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. `--schema <path>` on the command line
//! 2. Environment variables (`UKP_*`)
//! 3. Defaults (this file)
//!
//! Read-only after initialization, so no lock is needed.

use std::env;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};
use ukp_schema::{SchemaSource, DEFAULT_SCHEMA_PATH};

/// File the long code is exported to when no `--out` is given.
pub const DEFAULT_EXPORT_FILE: &str = "uzun_kod.txt";

const ENV_STATIC_SCHEMA: &str = "UKP_STATIC_SCHEMA";
const ENV_SCHEMA_PATH: &str = "UKP_SCHEMA_PATH";
const ENV_EXPORT_FILE: &str = "UKP_EXPORT_FILE";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    /// No `--schema` was given and the static schema is disabled or absent.
    #[error("No schema source: pass --schema <file> or provide {}", .path.display())]
    NoSchemaSource { path: PathBuf },
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Use the schema at `schema_path` when it exists.
    /// Default: true
    pub static_schema: bool,

    /// Static schema location.
    /// Default: "data/schema.xlsx"
    pub schema_path: PathBuf,

    /// Export target when `--out` is absent.
    /// Default: "uzun_kod.txt"
    pub export_file: PathBuf,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            static_schema: true,
            schema_path: PathBuf::from(DEFAULT_SCHEMA_PATH),
            export_file: PathBuf::from(DEFAULT_EXPORT_FILE),
        }
    }
}

impl ConfigState {
    /// Loads configuration from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `UKP_STATIC_SCHEMA`: `true`/`false` (also `1`/`0`, `yes`/`no`)
    /// - `UKP_SCHEMA_PATH`: static schema file
    /// - `UKP_EXPORT_FILE`: default export file
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ConfigState::from_env`] with an injectable variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(raw) = lookup(ENV_STATIC_SCHEMA) {
            config.static_schema = parse_flag(&raw).ok_or_else(|| {
                ConfigError::InvalidValue(format!("{ENV_STATIC_SCHEMA}={raw} is not a boolean"))
            })?;
        }

        if let Some(path) = lookup(ENV_SCHEMA_PATH).filter(|p| !p.trim().is_empty()) {
            config.schema_path = PathBuf::from(path);
        }

        if let Some(path) = lookup(ENV_EXPORT_FILE).filter(|p| !p.trim().is_empty()) {
            config.export_file = PathBuf::from(path);
        }

        debug!(?config, "Configuration loaded");
        Ok(config)
    }

    /// Picks the schema source for this run.
    ///
    /// An explicit path always wins. Otherwise the static schema is used if
    /// enabled and present on disk.
    pub fn resolve_source(&self, explicit: Option<&Path>) -> Result<SchemaSource, ConfigError> {
        if let Some(path) = explicit {
            if self.static_schema && path != self.schema_path {
                debug!(
                    static_path = %self.schema_path.display(),
                    "Static schema overridden by --schema"
                );
            }
            return Ok(SchemaSource::from_path(path));
        }

        if self.static_schema {
            if self.schema_path.is_file() {
                return Ok(SchemaSource::from_path(&self.schema_path));
            }
            warn!(path = %self.schema_path.display(), "Static schema not found");
        }

        Err(ConfigError::NoSchemaSource {
            path: self.schema_path.clone(),
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
