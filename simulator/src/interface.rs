use crate::config::{Config, ZipfConfig};
use crate::input::{parse_or_default, parse_values};
use crate::simulation::{run_heat_data, run_request_generation, SimulatorError};
use crate::sweep_runner::SweepRunner;
use popularity::top_k::{checked_k, SelectionStrategy};
use std::io::{BufRead, Write};
use std::path::PathBuf;

pub enum SimulationType {
    HeatData,
    ZipfSequence,
    SweepZipf,
    Exit,
}

impl SimulationType {
    pub fn from_input(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(SimulationType::HeatData),
            "2" => Some(SimulationType::ZipfSequence),
            "3" => Some(SimulationType::SweepZipf),
            "0" => Some(SimulationType::Exit),
            _ => None,
        }
    }
}

/// Interactive menu over an input and an output stream
pub struct SimulatorInterface<R: BufRead, W: Write> {
    input: R,
    output: W,
    config: Config,
    results_dir: Option<PathBuf>,
}

impl<R: BufRead, W: Write> SimulatorInterface<R, W> {
    pub fn new(input: R, output: W, config: Config) -> Self {
        Self {
            input,
            output,
            config,
            results_dir: None,
        }
    }

    /// Saves every finished run below `dir`
    pub fn with_results_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.results_dir = Some(dir.into());
        self
    }

    pub fn get_menu_text(&self) -> &'static str {
        "Available simulation types:\n  1. Heat data (Top-K of entered values)\n  2. Zipf request sequence\n  3. Sweep Zipf exponent\n  0. Exit"
    }

    pub fn show_menu(&mut self) -> Result<(), SimulatorError> {
        let menu = self.get_menu_text();
        writeln!(self.output, "=== Popularity Simulator ===")?;
        writeln!(self.output, "{}", menu)?;
        Ok(())
    }

    /// Prints `prompt` and reads one line, failing on end of input
    fn prompt(&mut self, prompt: &str) -> Result<String, SimulatorError> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(SimulatorError::Input("unexpected end of input".into()));
        }
        Ok(line)
    }

    pub fn get_user_choice(&mut self) -> Result<Option<SimulationType>, SimulatorError> {
        let line = self.prompt("\nSelect simulation type (0-3): ")?;
        Ok(SimulationType::from_input(&line))
    }

    /// Shows the menu until a valid choice is made, then runs it
    pub async fn run(&mut self) -> Result<(), SimulatorError> {
        self.show_menu()?;
        loop {
            match self.get_user_choice()? {
                Some(SimulationType::HeatData) => {
                    self.run_heat_data()?;
                    writeln!(self.output, "Heat data run completed successfully!")?;
                    break;
                }
                Some(SimulationType::ZipfSequence) => {
                    self.run_zipf_sequence()?;
                    writeln!(self.output, "Zipf request generation completed successfully!")?;
                    break;
                }
                Some(SimulationType::SweepZipf) => {
                    self.run_sweep().await?;
                    writeln!(self.output, "Sweep Zipf exponent simulation completed successfully!")?;
                    break;
                }
                Some(SimulationType::Exit) => {
                    writeln!(self.output, "Exiting...")?;
                    break;
                }
                None => {
                    let menu = self.get_menu_text();
                    writeln!(self.output, "Invalid choice. Please enter 1, 2, 3, or 0 to exit.")?;
                    writeln!(self.output, "{}", menu)?;
                }
            }
        }
        Ok(())
    }

    fn run_heat_data(&mut self) -> Result<(), SimulatorError> {
        let line = self.prompt("please enter some data(end with non-num):\n")?;
        let values = parse_values(&line);

        let default_k = self.config.heat_config.k;
        let k = loop {
            let line = self.prompt(&format!("how many heat_data do you want(enter for {}):\n", default_k))?;
            let line = if line.trim().is_empty() { default_k.to_string() } else { line };
            match line.trim().parse::<i64>().map_err(|e| e.to_string()).and_then(|k| checked_k(k).map_err(|e| e.to_string())) {
                Ok(k) if k > 0 => break k,
                _ => writeln!(self.output, "input is invalid,please reinput(k>0):")?,
            }
        };

        let default_strategy = self.config.heat_config.strategy;
        let strategy = loop {
            let line = self.prompt(&format!(
                "what method do you want(sort:0 or heap:1, enter for {}):\n",
                default_strategy
            ))?;
            if line.trim().is_empty() {
                break default_strategy;
            }
            match line.parse::<SelectionStrategy>() {
                Ok(strategy) => break strategy,
                Err(_) => writeln!(self.output, "input is invalid,please reinput(0 or 1):")?,
            }
        };

        let results = run_heat_data(values, k, strategy);
        write!(self.output, "{}", results.render())?;
        if let Some(dir) = &self.results_dir {
            results.save_to_directory(dir.join("heat_data"))?;
        }
        Ok(())
    }

    fn run_zipf_sequence(&mut self) -> Result<(), SimulatorError> {
        let defaults = self.config.zipf_config.clone();
        writeln!(self.output, "please input these information:(-1 or enter for default)")?;

        let num_contents = self.prompt_parameter(&format!("number of contents [{}]:", defaults.num_contents), defaults.num_contents)?;
        let q = self.prompt_parameter(&format!("q [{}]:", defaults.q), defaults.q)?;
        let s = self.prompt_parameter(&format!("s [{}]:", defaults.s), defaults.s)?;
        let num_requests = self.prompt_parameter(&format!("number of requests [{}]:", defaults.num_requests), defaults.num_requests)?;

        let config = ZipfConfig {
            num_contents,
            q,
            s,
            num_requests,
            seed: defaults.seed,
        };
        let results = run_request_generation(&config)?;
        write!(self.output, "{}", results.render())?;
        if let Some(dir) = &self.results_dir {
            results.save_to_directory(dir.join("zipf_sequence"))?;
        }
        Ok(())
    }

    fn prompt_parameter<T: std::str::FromStr>(&mut self, prompt: &str, default: T) -> Result<T, SimulatorError> {
        let line = self.prompt(prompt)?;
        parse_or_default(&line, default).map_err(SimulatorError::Input)
    }

    async fn run_sweep(&mut self) -> Result<(), SimulatorError> {
        let mut runner = SweepRunner::new(&self.config);
        if let Some(dir) = &self.results_dir {
            runner = runner.with_results_dir(dir.join("sweep_zipf"));
        }
        writeln!(self.output, "Running Sweep: Zipf Exponent")?;
        let points = runner.run().await?;
        for point in &points {
            writeln!(
                self.output,
                "s={:.3} head share={:.4} (expected {:.4}) max deviation={:.5}",
                point.s, point.head_share, point.head_probability, point.max_deviation
            )?;
        }
        Ok(())
    }
}
