//! Zipf-Mandelbrot popularity law over ranks 1..=N.
//!
//! The weight of rank i is `1 / (i + q)^s`. The distribution is fully
//! described by its normalized cumulative table, built once on construction.

use crate::frequency::FrequencyTable;
use crate::types::constants;
use crate::utils::logging;
use thiserror::Error;

pub mod sampler;
pub use sampler::SequenceSampler;

#[cfg(test)]
mod tests;

#[derive(Debug, Error, PartialEq)]
pub enum ZipfError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Immutable Zipf-Mandelbrot distribution with its cumulative table
#[derive(Debug, Clone, PartialEq)]
pub struct ZipfMandelbrot {
    /// Number of ranks N
    num_contents: usize,
    /// Plateau parameter, flattens the head for q > 0
    q: f64,
    /// Exponent, larger values skew towards rank 1
    s: f64,
    /// N + 1 entries, `cumulative[0] = 0` and `cumulative[N] = 1`
    cumulative: Vec<f64>,
}

impl ZipfMandelbrot {
    /// Builds the distribution for `num_contents` ranks.
    ///
    /// # Errors
    /// `ZipfError::InvalidParameter` if `num_contents` is 0 or too large to
    /// hold a table for, `s` is not a positive finite number or `q` is not a
    /// non-negative finite number.
    pub fn new(num_contents: usize, q: f64, s: f64) -> Result<Self, ZipfError> {
        if num_contents == 0 {
            return Err(ZipfError::InvalidParameter("number of contents must be at least 1".into()));
        }
        if !(s.is_finite() && s > 0.0) {
            return Err(ZipfError::InvalidParameter(format!("s must be positive and finite, got {}", s)));
        }
        if !(q.is_finite() && q >= 0.0) {
            return Err(ZipfError::InvalidParameter(format!("q must be non-negative and finite, got {}", q)));
        }

        let len = num_contents
            .checked_add(1)
            .ok_or_else(|| ZipfError::InvalidParameter(format!("number of contents {} is too large", num_contents)))?;
        let mut cumulative = Vec::new();
        cumulative.try_reserve_exact(len).map_err(|e| {
            ZipfError::InvalidParameter(format!("cannot allocate table for {} contents: {}", num_contents, e))
        })?;
        cumulative.push(0.0);

        // Weights are taken relative to rank 1, so each lies in (0, 1] and the
        // total is at least 1 even where (i + q)^s overflows.
        let mut running = 0.0;
        for rank in 1..=num_contents {
            running += ((1.0 + q) / (rank as f64 + q)).powf(s);
            cumulative.push(running);
        }

        let total = running;
        for value in cumulative.iter_mut().skip(1) {
            *value /= total;
        }
        cumulative[num_contents] = 1.0;

        logging::log("ZIPF", &format!(
            "Built cumulative table with {} contents, q = {}, s = {}",
            num_contents, q, s
        ));
        Ok(Self {
            num_contents,
            q,
            s,
            cumulative,
        })
    }

    pub fn num_contents(&self) -> usize {
        self.num_contents
    }

    pub fn q(&self) -> f64 {
        self.q
    }

    pub fn s(&self) -> f64 {
        self.s
    }

    /// The whole normalized cumulative table, index 0..=N
    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }

    /// Probability mass up to and including `rank`. Ranks beyond N saturate at 1.
    pub fn cumulative_at(&self, rank: usize) -> f64 {
        self.cumulative[rank.min(self.num_contents)]
    }

    /// Probability of drawing exactly `rank`, 0 outside 1..=N
    pub fn probability(&self, rank: usize) -> f64 {
        if rank == 0 || rank > self.num_contents {
            return 0.0;
        }
        self.cumulative[rank] - self.cumulative[rank - 1]
    }

    /// Maps a uniform value to the smallest rank i with `u < C[i]`.
    ///
    /// Returns N when rounding leaves no such rank, never 0.
    pub fn rank_for(&self, u: f64) -> usize {
        // Binary search gives the same rank as a linear scan since C is non-decreasing.
        let idx = self.cumulative[1..].partition_point(|&c| c <= u);
        if idx == self.num_contents {
            tracing::warn!(u, num_contents = self.num_contents, "uniform draw beyond cumulative table, clamping to last rank");
            return self.num_contents;
        }
        idx + 1
    }

    /// Largest absolute gap between a rank's empirical share in `observed`
    /// and its probability. An empty table has no deviation.
    pub fn max_deviation(&self, observed: &FrequencyTable<usize>) -> f64 {
        let total = observed.total();
        if total == 0 {
            return 0.0;
        }
        (1..=self.num_contents)
            .map(|rank| {
                let empirical = observed.get(&rank).unwrap_or(0) as f64 / total as f64;
                (empirical - self.probability(rank)).abs()
            })
            .fold(0.0, f64::max)
    }
}

impl Default for ZipfMandelbrot {
    fn default() -> Self {
        Self::new(constants::DEFAULT_NUM_CONTENTS, constants::DEFAULT_Q, constants::DEFAULT_S)
            .unwrap_or_else(|e| unreachable!("default Zipf parameters are valid: {}", e))
    }
}
