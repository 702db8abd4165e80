//! Defaults of the heat data and request generation tools.

/// Number of distinct contents (ranks) when none is configured
pub const DEFAULT_NUM_CONTENTS: usize = 10;

/// Zipf-Mandelbrot plateau parameter q
pub const DEFAULT_Q: f64 = 0.7;

/// Zipf-Mandelbrot exponent s
pub const DEFAULT_S: f64 = 0.7;

/// Number of requests generated per run
pub const DEFAULT_NUM_REQUESTS: usize = 100;

/// Ranks printed per line when rendering a request sequence
pub const SEQUENCE_LINE_WIDTH: usize = 10;
