use popularity::{FrequencyTable, ZipfMandelbrot};
use serde_json;

/// How often each content rank was requested in a generated sequence
#[derive(Debug, Clone, Default)]
pub struct ContentSelectionStats {
    content_counts: FrequencyTable<usize>,
}

impl ContentSelectionStats {
    pub fn from_sequence(sequence: &[usize]) -> Self {
        Self {
            content_counts: sequence.iter().copied().collect(),
        }
    }

    pub fn table(&self) -> &FrequencyTable<usize> {
        &self.content_counts
    }

    /// Number of distinct contents that were requested at least once
    pub fn content_size(&self) -> usize {
        self.content_counts.len()
    }

    /// `(rank, requests)` pairs sorted by rank
    pub fn get_sorted_counts(&self) -> Vec<(usize, u64)> {
        self.content_counts
            .sorted_by_value()
            .into_iter()
            .map(|(rank, count)| (*rank, count))
            .collect()
    }

    /// Observed and expected share per rank, including ranks never drawn
    pub fn to_json(&self, dist: &ZipfMandelbrot) -> serde_json::Value {
        let total = self.content_counts.total().max(1) as f64;
        serde_json::json!({
            "content_selection": (1..=dist.num_contents()).map(|rank| {
                let requests = self.content_counts.get(&rank).unwrap_or(0);
                serde_json::json!({
                    "content": rank,
                    "requests": requests,
                    "observed_share": requests as f64 / total,
                    "expected_share": dist.probability(rank)
                })
            }).collect::<Vec<_>>()
        })
    }
}
