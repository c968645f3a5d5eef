//! Server configuration
//!
//! Loaded from an optional JSON file named by `AMICOS_CONFIG`, then
//! overridden field by field from the environment:
//!
//! - `AMICOS_BIND`: listen address, e.g. `127.0.0.1:9200`
//! - `AMICOS_ENFORCE_RANGES`: `true`/`false`

use amicos_core::{CorneringInputs, InputRanges};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_PATH_VAR: &str = "AMICOS_CONFIG";
pub const BIND_VAR: &str = "AMICOS_BIND";
pub const ENFORCE_RANGES_VAR: &str = "AMICOS_ENFORCE_RANGES";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value {value:?} for {var}")]
    InvalidEnv { var: &'static str, value: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,

    /// Evaluations buffered per SSE subscriber before it starts lagging
    pub broadcast_capacity: usize,

    /// Reject snapshots outside `ranges` instead of evaluating them
    pub enforce_input_ranges: bool,

    /// Default tracing filter when `RUST_LOG` is unset
    pub log_filter: String,

    pub ranges: InputRanges,

    /// Snapshot the live session starts from
    pub initial_inputs: CorneringInputs,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 9200)),
            broadcast_capacity: 100,
            enforce_input_ranges: true,
            log_filter: "info".to_string(),
            ranges: InputRanges::default(),
            initial_inputs: CorneringInputs::default(),
        }
    }
}

impl ServerConfig {
    /// Load from `AMICOS_CONFIG` (if set) and apply environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let base = match std::env::var_os(CONFIG_PATH_VAR) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        base.with_overrides(|var| std::env::var(var).ok())
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(data)?)
    }

    /// Apply overrides from a variable lookup (the process environment in `load`)
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(BIND_VAR) {
            self.bind_addr = value.parse().map_err(|_| ConfigError::InvalidEnv {
                var: BIND_VAR,
                value: value.clone(),
            })?;
        }

        if let Some(value) = lookup(ENFORCE_RANGES_VAR) {
            self.enforce_input_ranges = match value.to_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        var: ENFORCE_RANGES_VAR,
                        value,
                    })
                }
            };
        }

        Ok(self)
    }
}
