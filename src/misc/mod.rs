//! Sample statistics over sequences of estimates
mod stats;

pub use stats::*;
