//! Committee configuration.
//!
//! Quorum size, reporter count, skew window, and price bounds are protocol
//! constants. Only the per-token knobs below are configurable.
//!
//! ```toml
//! max_history = 1024
//! decimals = 15
//! staleness_threshold_secs = 3600
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use qoracle_types::{AGGREGATE_PRICE_DECIMALS, DEFAULT_MAX_HISTORY, SYNTHETIC_PRICE_DECIMALS};

use crate::circuit_breaker::DEFAULT_STALENESS_THRESHOLD;
use crate::{OracleError, Result};

/// Per-instance committee settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitteeConfig {
    /// Accepted observations retained in history. Must be at least 1.
    #[serde(default = "default_max_history")]
    pub max_history: usize,
    /// Price scale of the consuming token; seeds the genesis observation.
    #[serde(default = "default_decimals")]
    pub decimals: u8,
    /// Seconds after the last accepted observation before consumers treat
    /// the price as stale.
    #[serde(default = "default_staleness_threshold")]
    pub staleness_threshold_secs: u64,
}

fn default_max_history() -> usize {
    DEFAULT_MAX_HISTORY
}

fn default_decimals() -> u8 {
    AGGREGATE_PRICE_DECIMALS
}

fn default_staleness_threshold() -> u64 {
    DEFAULT_STALENESS_THRESHOLD
}

impl Default for CommitteeConfig {
    fn default() -> Self {
        Self {
            max_history: default_max_history(),
            decimals: default_decimals(),
            staleness_threshold_secs: default_staleness_threshold(),
        }
    }
}

impl CommitteeConfig {
    /// Defaults for the 8-decimal synthetic-asset token.
    pub fn synthetic() -> Self {
        Self {
            decimals: SYNTHETIC_PRICE_DECIMALS,
            ..Self::default()
        }
    }

    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// - [`OracleError::Config`] on malformed TOML or invalid values
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CommitteeConfig =
            toml::from_str(content).map_err(|e| OracleError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    ///
    /// # Errors
    ///
    /// - [`OracleError::Config`] if the file cannot be read or is invalid
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| OracleError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// - [`OracleError::Config`] if `max_history` is zero
    pub fn validate(&self) -> Result<()> {
        if self.max_history == 0 {
            return Err(OracleError::Config(
                "max_history must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
