//! Inversion sampling of request sequences from a Zipf-Mandelbrot law.

use super::ZipfMandelbrot;
use crate::utils::logging;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Draws ranks from a distribution using a generator it owns.
///
/// Each sampler has its own generator, so parallel generation uses one
/// sampler per worker (see [`SequenceSampler::for_worker`]).
#[derive(Debug, Clone)]
pub struct SequenceSampler<R: Rng> {
    rng: R,
}

impl<R: Rng> SequenceSampler<R> {
    /// Wraps an existing generator
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draws one rank in 1..=N
    pub fn draw(&mut self, dist: &ZipfMandelbrot) -> usize {
        let u: f64 = self.rng.gen();
        dist.rank_for(u)
    }

    /// Draws `n` independent ranks
    pub fn draw_many(&mut self, dist: &ZipfMandelbrot, n: usize) -> Vec<usize> {
        logging::log("SAMPLER", &format!(
            "Drawing {} requests over {} contents",
            n,
            dist.num_contents()
        ));
        (0..n).map(|_| self.draw(dist)).collect()
    }

    /// Gives the generator back
    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl SequenceSampler<StdRng> {
    /// Reproducible sampler for a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Sampler seeded from the operating system
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Independently seeded sampler for worker `worker` of a parallel run
    pub fn for_worker(base_seed: u64, worker: u64) -> Self {
        Self::seeded(base_seed.wrapping_add(worker.wrapping_mul(0x9E37_79B9_7F4A_7C15)))
    }
}
