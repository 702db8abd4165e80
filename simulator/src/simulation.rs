//! Runs of the heat data and request generation tools.

use crate::config::{ConfigError, ZipfConfig};
use crate::request_generator::RequestGenerator;
use crate::simulation_results::{GenerationResults, HeatResults};
use chrono::Local;
use popularity::utils::logging;
use popularity::{count, SelectionStrategy};
use std::time::Instant;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimulatorError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to write results: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize results: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Simulation task failed: {0}")]
    Task(String),
}

impl From<popularity::zipf::ZipfError> for SimulatorError {
    fn from(e: popularity::zipf::ZipfError) -> Self {
        SimulatorError::Config(ConfigError::Zipf(e))
    }
}

impl From<popularity::top_k::TopKError> for SimulatorError {
    fn from(e: popularity::top_k::TopKError) -> Self {
        SimulatorError::Config(ConfigError::TopK(e))
    }
}

/// Counts `values` and selects the `k` hottest with `strategy`
pub fn run_heat_data(values: Vec<i64>, k: usize, strategy: SelectionStrategy) -> HeatResults {
    logging::log("SIMULATOR", &format!(
        "Heat data run over {} values with k = {} and strategy {}",
        values.len(), k, strategy
    ));
    let table = count(values);
    let top = strategy.select(&table, k);
    HeatResults {
        strategy,
        k,
        table,
        top,
    }
}

/// Generates one request sequence from `config`
pub fn run_request_generation(config: &ZipfConfig) -> Result<GenerationResults, SimulatorError> {
    let start_time = Instant::now();
    logging::log("SIMULATOR", "=== Request Generation Configuration ===");
    logging::log("SIMULATOR", &format!("Start Time: {}", Local::now().format("%Y-%m-%d %H:%M:%S")));
    logging::log("SIMULATOR", &format!("Number of Contents: {}", config.num_contents));
    logging::log("SIMULATOR", &format!("q: {}", config.q));
    logging::log("SIMULATOR", &format!("s: {}", config.s));
    logging::log("SIMULATOR", &format!("Number of Requests: {}", config.num_requests));
    logging::log("SIMULATOR", "========================================");

    let mut generator = RequestGenerator::new(config)?;
    let sequence = generator.generate(config.num_requests);
    Ok(GenerationResults::new(
        generator.distribution().clone(),
        config.seed,
        sequence,
        start_time,
    ))
}
