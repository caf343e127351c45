//! Service configuration from environment variables
//!
//! | Variable | Default |
//! |---|---|
//! | `SIMULATOR_ROUTE_PREFIX` | `/api/simulations` (`/` serves from the root) |
//! | `SIMULATOR_PERSIST_RESULTS` | `false` |
//! | `SIMULATOR_MAX_RECORDS` | unlimited |
//! | `SIMULATOR_FEE_SCHEDULE` | built-in fee table |

use crate::fees::FeeSchedule;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_ROUTE_PREFIX: &str = "/api/simulations";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}' ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("environment variable error: {0}")]
    EnvError(String),
}

/// Settings for the HTTP front end
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    /// Path under which the simulation routes are served
    pub route_prefix: String,
    /// Store engine results alongside each submission
    pub persist_results: bool,
    /// Maximum records held in memory
    pub max_records: Option<usize>,
    /// JSON file overriding the default fee schedule
    pub fee_schedule_path: Option<PathBuf>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            route_prefix: DEFAULT_ROUTE_PREFIX.to_string(),
            persist_results: false,
            max_records: None,
            fee_schedule_path: None,
        }
    }
}

impl ServiceConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| match std::env::var(key) {
            Ok(value) => Ok(Some(value)),
            Err(std::env::VarError::NotPresent) => Ok(None),
            Err(e) => Err(ConfigError::EnvError(format!("{key}: {e}"))),
        })
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Result<Option<String>, ConfigError>,
    {
        let mut config = Self::default();

        if let Some(prefix) = lookup("SIMULATOR_ROUTE_PREFIX")? {
            let trimmed = prefix.trim();
            if !trimmed.starts_with('/') {
                return Err(ConfigError::InvalidValue {
                    var: "SIMULATOR_ROUTE_PREFIX",
                    value: prefix,
                    reason: "must start with '/'",
                });
            }
            // A bare "/" becomes the empty prefix
            config.route_prefix = trimmed.trim_end_matches('/').to_string();
        }

        if let Some(value) = lookup("SIMULATOR_PERSIST_RESULTS")? {
            config.persist_results = parse_bool(&value).ok_or(ConfigError::InvalidValue {
                var: "SIMULATOR_PERSIST_RESULTS",
                value,
                reason: "expected true/false",
            })?;
        }

        if let Some(value) = lookup("SIMULATOR_MAX_RECORDS")? {
            match value.trim().parse::<usize>() {
                Ok(n) if n > 0 => config.max_records = Some(n),
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: "SIMULATOR_MAX_RECORDS",
                        value,
                        reason: "expected a positive integer",
                    })
                }
            }
        }

        if let Some(path) = lookup("SIMULATOR_FEE_SCHEDULE")? {
            if !path.trim().is_empty() {
                config.fee_schedule_path = Some(PathBuf::from(path.trim()));
            }
        }

        Ok(config)
    }

    /// Fee schedule to use: the configured file or the built-in table
    pub fn fee_schedule(&self) -> crate::Result<FeeSchedule> {
        match &self.fee_schedule_path {
            Some(path) => FeeSchedule::from_json_file(path),
            None => Ok(FeeSchedule::default()),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
