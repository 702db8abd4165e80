use crate::request_stats::ContentSelectionStats;
use crate::simulation::SimulatorError;
use popularity::types::constants::SEQUENCE_LINE_WIDTH;
use popularity::utils::logging;
use popularity::{select_top_k_by_sort, FrequencyTable, SelectionStrategy, TopKResult, ZipfMandelbrot};
use serde_json;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::time::Instant;

// ------------------------------------------------------------------------------------------------
// Heat Data Results
// ------------------------------------------------------------------------------------------------

/// Outcome of a Top-K run over entered values
#[derive(Debug)]
pub struct HeatResults {
    pub strategy: SelectionStrategy,
    pub k: usize,
    pub table: FrequencyTable<i64>,
    pub top: TopKResult<i64>,
}

impl HeatResults {
    /// Renders the run the way the heat data tool prints it
    pub fn render(&self) -> String {
        let mut out = String::new();
        match self.strategy {
            SelectionStrategy::Sort => {
                let _ = writeln!(out, "sort before:");
                for (value, count) in self.table.sorted_by_value() {
                    let _ = writeln!(out, "data={},freq={}", value, count);
                }
                let _ = writeln!(out, "\nsort after:");
                for entry in select_top_k_by_sort(&self.table, self.table.len()) {
                    let _ = writeln!(out, "{}", entry);
                }
                let _ = writeln!(out, "popularity data:");
            }
            SelectionStrategy::Heap => {
                let _ = writeln!(out, "pop data:");
            }
        }
        for entry in &self.top {
            let _ = writeln!(out, "{}", entry);
        }
        out
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "parameters": {
                "strategy": self.strategy,
                "k": self.k,
                "num_values": self.table.total(),
                "distinct_values": self.table.len()
            },
            "top_k": self.top
        })
    }

    /// Saves the results below `dir`
    pub fn save_to_directory<P: AsRef<Path>>(&self, dir: P) -> Result<(), SimulatorError> {
        let data_dir = dir.as_ref().join("data");
        fs::create_dir_all(&data_dir)?;
        let file = data_dir.join("heat_data.json");
        fs::write(&file, serde_json::to_string_pretty(&self.to_json())?)?;
        logging::log("SIMULATOR", &format!("Saved heat data results to {}", file.display()));
        Ok(())
    }
}

// ------------------------------------------------------------------------------------------------
// Request Generation Results
// ------------------------------------------------------------------------------------------------

/// Outcome of one generated request sequence
#[derive(Debug)]
pub struct GenerationResults {
    pub dist: ZipfMandelbrot,
    pub num_requests: usize,
    pub seed: Option<u64>,
    pub sequence: Vec<usize>,
    pub stats: ContentSelectionStats,
    pub max_deviation: f64,
    pub start_time: Instant,
}

impl GenerationResults {
    pub fn new(dist: ZipfMandelbrot, seed: Option<u64>, sequence: Vec<usize>, start_time: Instant) -> Self {
        let stats = ContentSelectionStats::from_sequence(&sequence);
        let max_deviation = dist.max_deviation(stats.table());
        Self {
            num_requests: sequence.len(),
            dist,
            seed,
            sequence,
            stats,
            max_deviation,
            start_time,
        }
    }

    /// Renders the sequence ten ranks per line followed by the frequency table
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "number of contents:{}, q:{}, s:{}, number of requests:{}",
            self.dist.num_contents(),
            self.dist.q(),
            self.dist.s(),
            self.num_requests
        );
        let _ = writeln!(out, "seq of contents:");
        for line in self.sequence.chunks(SEQUENCE_LINE_WIDTH) {
            let ranks: Vec<String> = line.iter().map(|r| r.to_string()).collect();
            let _ = writeln!(out, "{}", ranks.join(" "));
        }
        let _ = writeln!(out, "content frequency:");
        for (rank, count) in self.stats.get_sorted_counts() {
            let _ = writeln!(out, "{} {}", rank, count);
        }
        let _ = writeln!(out, "content size = {}", self.stats.content_size());
        out
    }

    /// Saves the results below `dir`
    pub fn save_to_directory<P: AsRef<Path>>(&self, dir: P) -> Result<(), SimulatorError> {
        logging::log("SIMULATOR", "=== Generation Statistics ===");
        logging::log("SIMULATOR", &format!("Total Requests: {}", self.num_requests));
        logging::log("SIMULATOR", &format!("Distinct Contents: {}", self.stats.content_size()));
        logging::log("SIMULATOR", &format!("Max Deviation: {:.5}", self.max_deviation));
        logging::log("SIMULATOR", &format!("Elapsed: {:.3}s", self.start_time.elapsed().as_secs_f64()));
        logging::log("SIMULATOR", "=============================");

        let data_dir = dir.as_ref().join("data");
        fs::create_dir_all(&data_dir)?;

        let stats = serde_json::json!({
            "parameters": {
                "num_contents": self.dist.num_contents(),
                "q": self.dist.q(),
                "s": self.dist.s(),
                "num_requests": self.num_requests,
                "seed": self.seed
            },
            "results": {
                "content_size": self.stats.content_size(),
                "max_deviation": self.max_deviation
            }
        });
        let stats_file = data_dir.join("generation_stats.json");
        fs::write(&stats_file, serde_json::to_string_pretty(&stats)?)?;
        logging::log("SIMULATOR", &format!("Saved generation statistics to {}", stats_file.display()));

        let sequence_file = data_dir.join("request_sequence.json");
        fs::write(&sequence_file, serde_json::to_string(&self.sequence)?)?;
        logging::log("SIMULATOR", &format!("Saved request sequence to {}", sequence_file.display()));

        let selection_file = data_dir.join("content_selection.json");
        fs::write(&selection_file, serde_json::to_string_pretty(&self.stats.to_json(&self.dist))?)?;
        logging::log("SIMULATOR", &format!("Saved content selection data to {}", selection_file.display()));

        Ok(())
    }
}
