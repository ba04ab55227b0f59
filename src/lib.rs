//! Monte Carlo estimation of π with Buffon's needle.
//!
//! Needles of length one are dropped at random onto a table ruled with
//! vertical lines one unit apart. A needle crosses a line with probability
//! 2/π, so after dropping N needles of which C cross, `2N / C` estimates π.
//!
//! The crate is organized bottom-up:
//!
//! - [`Needle`] is a line segment with a crossing predicate and endpoints.
//! - [`NeedleDrop`] is the table needles are dropped on.
//! - [`Trial`] drops a fixed number of needles and estimates π once.
//! - [`Batch`] repeats a trial and collects the estimates.
//! - [`Experiment`] runs one batch per drop count from a seeded or entropy
//!   seeded generator.
//!
//! Every random function takes its generator explicitly.
//!
//! # Example
//!
//! ```
//! use buffon::run_batch;
//! use rand::SeedableRng;
//! use rand_xoshiro::Xoshiro256Plus;
//!
//! let mut rng = Xoshiro256Plus::seed_from_u64(0xABCD);
//! let estimates = run_batch(50, 1_000, &mut rng).unwrap();
//!
//! assert_eq!(estimates.len(), 50);
//! assert!(estimates.iter().all(|pi_est| (2.8..=3.5).contains(pi_est)));
//! ```

#[cfg(test)]
doc_comment::doctest!("../README.md");

// Display implementation for value types
#[macro_export]
macro_rules! impl_display {
    ($kind: ty) => {
        impl ::std::fmt::Display for $kind {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                write!(f, "{}", String::from(self))
            }
        }
    };
}

pub mod batch;
pub mod cartoon;
pub mod consts;
pub mod experiment;
pub mod misc;
pub mod needle;
pub mod prelude;
pub mod table;
pub mod traits;
pub mod trial;

pub use batch::{
    run_batch, Batch, BatchError, BatchParameters, BatchResult,
    DegeneratePolicy, Progress,
};
pub use cartoon::{
    Cartoon, CartoonError, CartoonFrame, CartoonNeedle, CartoonParameters,
};
pub use experiment::{Experiment, ExperimentError, ExperimentResult};
pub use needle::{Needle, NeedleError};
pub use table::{
    sample_needle, NeedleDrop, NeedleDropError, NeedleDropParameters,
};
pub use trial::{
    run_trial, Trial, TrialError, TrialOutcome, TrialParameters,
};
