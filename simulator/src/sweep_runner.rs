use crate::config::Config;
use crate::simulation::SimulatorError;
use chrono::Local;
use futures::future::try_join_all;
use indicatif::{ProgressBar, ProgressStyle};
use popularity::utils::logging;
use popularity::{count, select_top_k_by_heap, RankedEntry, SequenceSampler, ZipfMandelbrot};
use serde::Serialize;
use serde_json;
use std::fs;
use std::path::{Path, PathBuf};

/// Number of hottest contents recorded per sweep point
const SWEEP_TOP_K: usize = 3;

/// Result of one sweep point
#[derive(Debug, Clone, Serialize)]
pub struct SweepPoint {
    pub s: f64,
    pub num_requests: usize,
    pub content_size: usize,
    pub head_probability: f64,
    pub head_share: f64,
    pub max_deviation: f64,
    pub top_contents: Vec<RankedEntry<usize>>,
}

/// Sweeps the Zipf exponent s, generating one request sequence per value.
///
/// Each point runs on the blocking pool with its own generator derived from
/// the base seed, so results do not depend on scheduling.
pub struct SweepRunner {
    sweep_name: String,
    results_dir: Option<PathBuf>,
    num_contents: usize,
    q: f64,
    num_requests: usize,
    seed: u64,
    parameter_values: Vec<f64>,
    show_progress: bool,
}

impl SweepRunner {
    pub fn new(config: &Config) -> Self {
        Self {
            sweep_name: "Zipf Exponent".to_string(),
            results_dir: None,
            num_contents: config.zipf_config.num_contents,
            q: config.zipf_config.q,
            num_requests: config.sweep_config.num_requests,
            seed: config.sweep_config.seed,
            parameter_values: config.sweep_exponents(),
            show_progress: true,
        }
    }

    /// Saves the combined results below `dir` when the sweep finishes
    pub fn with_results_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.results_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Runs the complete sweep
    pub async fn run(&self) -> Result<Vec<SweepPoint>, SimulatorError> {
        self.log_sweep_start();
        let progress_bar = self.create_progress_bar();

        let tasks = self.parameter_values.iter().enumerate().map(|(sim_index, &s)| {
            let progress_bar = progress_bar.clone();
            let (num_contents, q, num_requests, seed) = (self.num_contents, self.q, self.num_requests, self.seed);
            let total = self.parameter_values.len();
            async move {
                let point = tokio::task::spawn_blocking(move || {
                    run_sweep_point(num_contents, q, s, num_requests, seed, sim_index as u64)
                })
                .await
                .map_err(|e| SimulatorError::Task(format!("sweep point {} panicked: {}", sim_index + 1, e)))??;
                progress_bar.inc(1);
                progress_bar.set_message(format!("Simulation {}/{} with s: {:.3}", sim_index + 1, total, s));
                Ok::<SweepPoint, SimulatorError>(point)
            }
        });
        let points = try_join_all(tasks).await?;
        progress_bar.finish_with_message("Sweep complete");

        if let Some(dir) = &self.results_dir {
            save_sweep_results(dir, &points)?;
        }

        logging::log("SIMULATOR", "=== Sweep Simulation Complete ===");
        logging::log("SIMULATOR", &format!("Total simulations completed: {}", points.len()));
        Ok(points)
    }

    fn create_progress_bar(&self) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let progress_bar = ProgressBar::new(self.parameter_values.len() as u64);
        if let Ok(style) = ProgressStyle::default_bar().template("[{elapsed_precise}] {bar:40.cyan/blue} {msg}") {
            progress_bar.set_style(style.progress_chars("+>-"));
        }
        progress_bar
    }

    fn log_sweep_start(&self) {
        logging::log("SIMULATOR", &format!("=== Sweep {} Simulation ===", self.sweep_name));
        logging::log("SIMULATOR", &format!("Start Time: {}", Local::now().format("%Y-%m-%d %H:%M:%S")));
        logging::log("SIMULATOR", &format!("Number of simulations: {}", self.parameter_values.len()));
        logging::log("SIMULATOR", &format!("s values: {:?}", self.parameter_values));
        logging::log("SIMULATOR", &format!("Contents: {}, q: {}, requests per point: {}", self.num_contents, self.q, self.num_requests));
        logging::log("SIMULATOR", "================================");
    }
}

/// Generates and measures one sweep point
fn run_sweep_point(
    num_contents: usize,
    q: f64,
    s: f64,
    num_requests: usize,
    seed: u64,
    worker: u64,
) -> Result<SweepPoint, SimulatorError> {
    let dist = ZipfMandelbrot::new(num_contents, q, s)?;
    let mut sampler = SequenceSampler::for_worker(seed, worker);
    let table = count(sampler.draw_many(&dist, num_requests));

    let head_share = table.get(&1).unwrap_or(0) as f64 / num_requests.max(1) as f64;
    Ok(SweepPoint {
        s,
        num_requests,
        content_size: table.len(),
        head_probability: dist.probability(1),
        head_share,
        max_deviation: dist.max_deviation(&table),
        top_contents: select_top_k_by_heap(&table, SWEEP_TOP_K),
    })
}

/// Writes the combined sweep results to `<dir>/data/sweep_results.json`
pub fn save_sweep_results(dir: &Path, points: &[SweepPoint]) -> Result<(), SimulatorError> {
    let data_dir = dir.join("data");
    fs::create_dir_all(&data_dir)?;

    let combined_results = serde_json::json!({
        "sweep_summary": {
            "num_simulations": points.len(),
            "s_values": points.iter().map(|p| p.s).collect::<Vec<_>>(),
            "max_deviations": points.iter().map(|p| p.max_deviation).collect::<Vec<_>>(),
            "head_shares": points.iter().map(|p| p.head_share).collect::<Vec<_>>()
        },
        "individual_results": points
    });

    let combined_file = data_dir.join("sweep_results.json");
    fs::write(&combined_file, serde_json::to_string_pretty(&combined_results)?)?;
    logging::log("SIMULATOR", &format!("Saved combined sweep results to {}", combined_file.display()));
    Ok(())
}
