use std::env;
use std::fs;
use std::io;
use popularity::utils::logging;
use simulator::{Config, SimulatorError, SimulatorInterface};

const RESULTS_DIR: &str = "simulator/results";

// ------------------------------------------------------------------------------------------------
// Main
// ------------------------------------------------------------------------------------------------

/// Loads the configuration and hands control to the interactive menu
#[tokio::main]
async fn main() -> Result<(), SimulatorError> {
    // Create results directory if it doesn't exist
    fs::create_dir_all(RESULTS_DIR)?;

    // Setup logging
    setup_logging();

    // Load configuration
    let config = Config::load()?;

    let stdin = io::stdin();
    let mut interface = SimulatorInterface::new(stdin.lock(), io::stdout(), config)
        .with_results_dir(RESULTS_DIR);
    interface.run().await
}

/// Sets up logging if ENABLE_LOGS environment variable is set
fn setup_logging() {
    if env::var("ENABLE_LOGS").is_ok() {
        // Delete existing log file if it exists
        let log_path = format!("{}/simulation.log", RESULTS_DIR);
        if let Err(e) = fs::remove_file(&log_path) {
            // Ignore error if file doesn't exist
            if e.kind() != io::ErrorKind::NotFound {
                eprintln!("Error deleting log file: {}", e);
            }
        }

        // Initialize logging with simulation-specific log file
        env::set_var("POPULARITY_LOGGING", "true");
        env::set_var("POPULARITY_LOG_TO_FILE", "true");
        env::set_var("POPULARITY_LOG_FILE", &log_path);
        logging::init_logging();

        // Core warnings (e.g. sampling clamps) go through tracing
        tracing_subscriber::fmt().with_writer(io::stderr).init();
    }
}
