use crate::config::ZipfConfig;
use popularity::utils::logging;
use popularity::zipf::ZipfError;
use popularity::{SequenceSampler, ZipfMandelbrot};
use rand::rngs::StdRng;

// ------------------------------------------------------------------------------------------------
// Request Generation
// ------------------------------------------------------------------------------------------------

/// Generates content requests according to a Zipf-Mandelbrot distribution
pub struct RequestGenerator {
    dist: ZipfMandelbrot,
    sampler: SequenceSampler<StdRng>,
}

impl RequestGenerator {
    /// Creates a new request generator
    pub fn new(config: &ZipfConfig) -> Result<Self, ZipfError> {
        logging::log("REQUEST_GENERATOR", &format!(
            "Creating request generator with {} contents, q = {}, s = {}",
            config.num_contents, config.q, config.s
        ));
        let sampler = match config.seed {
            Some(seed) => SequenceSampler::seeded(seed),
            None => SequenceSampler::from_entropy(),
        };
        Ok(Self {
            dist: config.distribution()?,
            sampler,
        })
    }

    /// Selects one content rank
    pub fn next_request(&mut self) -> usize {
        self.sampler.draw(&self.dist)
    }

    /// Generates `num_requests` content ranks
    pub fn generate(&mut self, num_requests: usize) -> Vec<usize> {
        self.sampler.draw_many(&self.dist, num_requests)
    }

    pub fn distribution(&self) -> &ZipfMandelbrot {
        &self.dist
    }
}
