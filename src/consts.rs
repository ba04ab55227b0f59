//! Geometric and mathematical constants

/// 2π, the upper bound of the needle angle
pub const TWO_PI: f64 = 6.283_185_307_179_586;
/// 2/π, the probability that a short needle crosses a grid line
pub const CROSSING_PROB: f64 = std::f64::consts::FRAC_2_PI;

/// Distance between adjacent vertical grid lines
pub const GRID_SPACING: f64 = 1.0;
/// Length of every dropped needle. Must equal `GRID_SPACING`.
pub const NEEDLE_LEN: f64 = 1.0;

/// Side length of the square table needles are dropped on
pub const DEFAULT_SPAN: f64 = 10.0;
/// Trials per batch
pub const DEFAULT_NUM_TRIALS: usize = 50;
/// Needles per trial, one batch each
pub const DEFAULT_DROP_COUNTS: [usize; 5] = [10, 100, 1_000, 10_000, 100_000];
/// Needles in a cartoon frame
pub const DEFAULT_CARTOON_NEEDLES: usize = 200;
/// Widest table a cartoon frame will draw grid lines for
pub const MAX_CARTOON_SPAN: f64 = 1E6;

/// Batch progress is reported every this many trials
pub const PROGRESS_INTERVAL: usize = 10;
