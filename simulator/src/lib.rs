pub mod config;
pub mod input;
pub mod request_stats;
pub mod request_generator;
pub mod simulation_results;
pub mod simulation;
pub mod sweep_runner;
pub mod interface;

pub use config::{Config, ConfigError};
pub use request_generator::RequestGenerator;
pub use simulation::{run_heat_data, run_request_generation, SimulatorError};
pub use simulation_results::{GenerationResults, HeatResults};
pub use sweep_runner::SweepRunner;
pub use interface::SimulatorInterface;
