pub mod types;
pub mod frequency;
pub mod top_k;
pub mod zipf;
pub mod utils;

pub use frequency::{count, FrequencyTable};
pub use top_k::{select_top_k_by_heap, select_top_k_by_sort, SelectionStrategy, TopKSelector};
pub use types::{RankedEntry, TopKResult};
pub use zipf::{SequenceSampler, ZipfMandelbrot};
