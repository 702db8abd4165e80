//! Configuration loader and validator for the popularity simulator.
//! Handles parsing, validation, and access to simulation configuration files.

use popularity::top_k::{self, SelectionStrategy, TopKError};
use popularity::types::constants;
use popularity::utils::logging;
use popularity::zipf::{ZipfError, ZipfMandelbrot};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Config file read when `SIMULATOR_CONFIG` is not set
pub const DEFAULT_CONFIG_PATH: &str = "simulator/config/config.toml";

// ------------------------------------------------------------------------------------------------
// Main Configuration Structs
// ------------------------------------------------------------------------------------------------

/// Main configuration struct for simulation parameters.
///
/// Every section is optional in the file; missing sections and fields fall
/// back to the heat data and Zipf tool defaults.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Top-K selection over entered values
    pub heat_config: HeatConfig,
    /// Request sequence generation
    pub zipf_config: ZipfConfig,
    /// Sweep over the Zipf exponent
    pub sweep_config: SweepParameters,
}

/// Configuration for the heat data (Top-K) run.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct HeatConfig {
    /// Number of hottest values to report, must not be negative
    pub k: i64,
    /// Default selection strategy offered by the menu
    pub strategy: SelectionStrategy,
}

/// Configuration for a single Zipf-Mandelbrot request sequence.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ZipfConfig {
    /// Number of distinct contents N
    pub num_contents: usize,
    /// Plateau parameter q (>= 0)
    pub q: f64,
    /// Exponent s (> 0)
    pub s: f64,
    /// Number of requests to draw
    pub num_requests: usize,
    /// Fixed seed, `None` seeds from the operating system
    pub seed: Option<u64>,
}

/// Configuration for a sweep over the exponent s.
///
/// Simulation i uses `s = s_start + i * s_step`; every other parameter comes
/// from `zipf_config`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SweepParameters {
    /// Number of sweep points
    pub num_simulations: usize,
    /// Exponent of the first point
    pub s_start: f64,
    /// Increment between points
    pub s_step: f64,
    /// Requests drawn per point
    pub num_requests: usize,
    /// Base seed, each point derives its own generator from it
    pub seed: u64,
}

impl Default for HeatConfig {
    fn default() -> Self {
        Self {
            k: 3,
            strategy: SelectionStrategy::default(),
        }
    }
}

impl Default for ZipfConfig {
    fn default() -> Self {
        Self {
            num_contents: constants::DEFAULT_NUM_CONTENTS,
            q: constants::DEFAULT_Q,
            s: constants::DEFAULT_S,
            num_requests: constants::DEFAULT_NUM_REQUESTS,
            seed: None,
        }
    }
}

impl Default for SweepParameters {
    fn default() -> Self {
        Self {
            num_simulations: 10,
            s_start: 0.2,
            s_step: 0.2,
            num_requests: 100_000,
            seed: 7,
        }
    }
}

// ------------------------------------------------------------------------------------------------
// Error Types and Validation
// ------------------------------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
    #[error("Invalid Zipf parameters: {0}")]
    Zipf(#[from] ZipfError),
    #[error("Invalid heat data parameters: {0}")]
    TopK(#[from] TopKError),
}

// Common validation logic
pub fn validate_common_fields(
    heat_config: &HeatConfig,
    zipf_config: &ZipfConfig,
    sweep_config: &SweepParameters,
) -> Result<(), ConfigError> {
    top_k::checked_k(heat_config.k)?;
    zipf_config.distribution()?;
    if zipf_config.num_requests == 0 {
        return Err(ConfigError::ValidationError("Number of requests must be positive".into()));
    }
    if sweep_config.num_simulations == 0 {
        return Err(ConfigError::ValidationError("Number of sweep simulations must be positive".into()));
    }
    if !(sweep_config.s_start.is_finite() && sweep_config.s_start > 0.0) {
        return Err(ConfigError::ValidationError("Sweep s_start must be positive".into()));
    }
    if !(sweep_config.s_step.is_finite() && sweep_config.s_step > 0.0) {
        return Err(ConfigError::ValidationError("Sweep s_step must be positive".into()));
    }
    if sweep_config.num_requests == 0 {
        return Err(ConfigError::ValidationError("Sweep number of requests must be positive".into()));
    }
    Ok(())
}

// ------------------------------------------------------------------------------------------------
// Configuration Implementation Methods
// ------------------------------------------------------------------------------------------------

impl Config {
    /// Loads the config named by `SIMULATOR_CONFIG`, or the default path.
    /// A missing file yields the built-in defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::var("SIMULATOR_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        match Self::load_from(&path) {
            Err(ConfigError::FileReadError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                logging::log("SIMULATOR", &format!("No config at {}, using defaults", path));
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Reads and validates a TOML config file
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config_str = fs::read_to_string(path)?;
        Self::from_toml(&config_str)
    }

    /// Parses and validates TOML text
    pub fn from_toml(config_str: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(config_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_common_fields(&self.heat_config, &self.zipf_config, &self.sweep_config)
    }

    /// Exponents visited by the sweep, in order
    pub fn sweep_exponents(&self) -> Vec<f64> {
        let sweep = &self.sweep_config;
        (0..sweep.num_simulations)
            .map(|i| sweep.s_start + i as f64 * sweep.s_step)
            .collect()
    }
}

impl ZipfConfig {
    /// Builds the distribution these parameters describe
    pub fn distribution(&self) -> Result<ZipfMandelbrot, ZipfError> {
        ZipfMandelbrot::new(self.num_contents, self.q, self.s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parses() {
        let config = Config::from_toml(
            r#"
            [heat_config]
            k = 2
            strategy = "sort"

            [zipf_config]
            num_contents = 50
            q = 1.5
            s = 0.9
            num_requests = 1000
            seed = 42

            [sweep_config]
            num_simulations = 4
            s_start = 0.5
            s_step = 0.25
            num_requests = 5000
            seed = 3
            "#,
        )
        .expect("valid config");

        assert_eq!(config.heat_config.k, 2);
        assert_eq!(config.heat_config.strategy, SelectionStrategy::Sort);
        assert_eq!(config.zipf_config.num_contents, 50);
        assert_eq!(config.zipf_config.seed, Some(42));
        assert_eq!(config.sweep_exponents(), vec![0.5, 0.75, 1.0, 1.25]);
    }

    /// Missing sections fall back to the tool defaults
    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml("").expect("valid config");

        assert_eq!(config, Config::default());
        assert_eq!(config.zipf_config.num_contents, 10);
        assert_eq!(config.zipf_config.q, 0.7);
        assert_eq!(config.zipf_config.s, 0.7);
        assert_eq!(config.zipf_config.num_requests, 100);
        assert_eq!(config.heat_config.strategy, SelectionStrategy::Heap);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let negative_k = Config::from_toml("[heat_config]\nk = -1\n");
        assert!(matches!(negative_k, Err(ConfigError::TopK(TopKError::InvalidParameter(-1)))));

        let zero_s = Config::from_toml("[zipf_config]\ns = 0.0\n");
        assert!(matches!(zero_s, Err(ConfigError::Zipf(_))));

        let negative_q = Config::from_toml("[zipf_config]\nq = -0.5\n");
        assert!(matches!(negative_q, Err(ConfigError::Zipf(_))));

        let no_contents = Config::from_toml("[zipf_config]\nnum_contents = 0\n");
        assert!(matches!(no_contents, Err(ConfigError::Zipf(_))));

        let no_requests = Config::from_toml("[zipf_config]\nnum_requests = 0\n");
        assert!(matches!(no_requests, Err(ConfigError::ValidationError(_))));

        let bad_step = Config::from_toml("[sweep_config]\ns_step = 0.0\n");
        assert!(matches!(bad_step, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_unknown_strategy_is_parse_error() {
        let result = Config::from_toml("[heat_config]\nstrategy = \"bubble\"\n");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let result = Config::load_from("does/not/exist.toml");
        assert!(matches!(result, Err(ConfigError::FileReadError(_))));
    }

    #[test]
    fn test_shipped_config_is_valid() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/config.toml");
        let config = Config::load_from(path).expect("shipped config is valid");
        assert_eq!(config.zipf_config.num_contents, 10);
    }
}
