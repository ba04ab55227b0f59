//! Batches of trials across several drop counts
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::batch::{Batch, BatchError, BatchResult, DegeneratePolicy};
use crate::consts::{DEFAULT_DROP_COUNTS, DEFAULT_NUM_TRIALS, DEFAULT_SPAN, NEEDLE_LEN};
use crate::impl_display;
use crate::table::{NeedleDrop, NeedleDropError};
use log::debug;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256Plus;
use std::fmt;

/// Configuration for characterizing the estimator: one batch of
/// `num_trials` trials per entry of `drop_counts`.
///
/// Without a seed the random source is seeded from system entropy.
///
/// # Example
///
/// ```
/// use buffon::Experiment;
///
/// let experiment = Experiment::default()
///     .with_num_trials(10)
///     .with_drop_counts(vec![100, 1_000])
///     .with_seed(1337);
///
/// let result = experiment.run().unwrap();
/// assert_eq!(result.batches().len(), 2);
///
/// // Same seed, same estimates
/// assert_eq!(result, experiment.run().unwrap());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case", default))]
pub struct Experiment {
    pub num_trials: usize,
    pub drop_counts: Vec<usize>,
    /// Side of the square table
    pub span: f64,
    /// Must equal the grid spacing
    pub needle_len: f64,
    pub seed: Option<u64>,
    pub policy: DegeneratePolicy,
}

/// One batch per drop count, in the configured order
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct ExperimentResult {
    batches: Vec<BatchResult>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum ExperimentError {
    /// There are no drop counts to run
    NoDropCounts,
    /// The table or needle is invalid
    Table(NeedleDropError),
    /// The batch for `num_drops` is invalid or failed
    Batch { num_drops: usize, source: BatchError },
}

impl Default for Experiment {
    fn default() -> Self {
        Experiment {
            num_trials: DEFAULT_NUM_TRIALS,
            drop_counts: DEFAULT_DROP_COUNTS.to_vec(),
            span: DEFAULT_SPAN,
            needle_len: NEEDLE_LEN,
            seed: None,
            policy: DegeneratePolicy::default(),
        }
    }
}

impl Experiment {
    #[must_use]
    pub fn with_num_trials(mut self, num_trials: usize) -> Self {
        self.num_trials = num_trials;
        self
    }

    #[must_use]
    pub fn with_drop_counts(mut self, drop_counts: Vec<usize>) -> Self {
        self.drop_counts = drop_counts;
        self
    }

    #[must_use]
    pub fn with_span(mut self, span: f64) -> Self {
        self.span = span;
        self
    }

    #[must_use]
    pub fn with_needle_len(mut self, needle_len: f64) -> Self {
        self.needle_len = needle_len;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: DegeneratePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Build every batch without running any of them
    ///
    /// # Example
    ///
    /// ```
    /// # use buffon::{Experiment, ExperimentError, NeedleDropError};
    /// let long_needle = Experiment::default().with_needle_len(2.0);
    /// assert_eq!(
    ///     long_needle.batches(),
    ///     Err(ExperimentError::Table(NeedleDropError::NotShortNeedle {
    ///         needle_len: 2.0
    ///     }))
    /// );
    /// ```
    pub fn batches(&self) -> Result<Vec<Batch>, ExperimentError> {
        if self.drop_counts.is_empty() {
            return Err(ExperimentError::NoDropCounts);
        }
        let table = NeedleDrop::with_needle_len(self.span, self.needle_len)
            .map_err(ExperimentError::Table)?;

        self.drop_counts
            .iter()
            .map(|&num_drops| {
                Batch::with_table(self.num_trials, num_drops, table.clone())
                    .map(|batch| batch.with_policy(self.policy))
                    .map_err(|source| ExperimentError::Batch {
                        num_drops,
                        source,
                    })
            })
            .collect()
    }

    /// Check the configuration without running it
    pub fn validate(&self) -> Result<(), ExperimentError> {
        self.batches().map(|_| ())
    }

    /// Run every batch with a generator built from `seed`, or from system
    /// entropy if there is no seed.
    pub fn run(&self) -> Result<ExperimentResult, ExperimentError> {
        let mut rng = self
            .seed
            .map_or_else(Xoshiro256Plus::from_entropy, Xoshiro256Plus::seed_from_u64);
        self.run_with_rng(&mut rng)
    }

    /// Run every batch with the supplied generator
    pub fn run_with_rng<R: Rng>(
        &self,
        rng: &mut R,
    ) -> Result<ExperimentResult, ExperimentError> {
        let batches = self.batches()?;
        debug!(
            "Running {} batches of {} trials",
            batches.len(),
            self.num_trials
        );

        batches
            .iter()
            .map(|batch| {
                batch.run(rng).map_err(|source| ExperimentError::Batch {
                    num_drops: batch.num_drops(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(|batches| ExperimentResult { batches })
    }
}

impl ExperimentResult {
    /// Get the batch results in configuration order
    #[inline]
    pub fn batches(&self) -> &[BatchResult] {
        &self.batches
    }

    /// Get the batch for `num_drops`, if it was run
    pub fn batch(&self, num_drops: usize) -> Option<&BatchResult> {
        self.batches.iter().find(|b| b.num_drops() == num_drops)
    }

    #[inline]
    pub fn into_batches(self) -> Vec<BatchResult> {
        self.batches
    }
}

impl From<&Experiment> for String {
    fn from(exp: &Experiment) -> String {
        format!(
            "Experiment(trials: {}, drops: {:?}, span: {})",
            exp.num_trials, exp.drop_counts, exp.span
        )
    }
}

impl_display!(Experiment);

impl std::error::Error for ExperimentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NoDropCounts => None,
            Self::Table(err) => Some(err),
            Self::Batch { source, .. } => Some(source),
        }
    }
}

impl fmt::Display for ExperimentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDropCounts => write!(f, "no drop counts to run"),
            Self::Table(err) => write!(f, "invalid table: {err}"),
            Self::Batch { num_drops, source } => {
                write!(f, "batch of {num_drops} drops: {source}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_basic_impls;

    test_basic_impls!(Experiment::default());

    #[test]
    fn default_matches_reference_sweep() {
        let exp = Experiment::default();
        assert_eq!(exp.num_trials, 50);
        assert_eq!(exp.drop_counts, vec![10, 100, 1_000, 10_000, 100_000]);
        assert::close(exp.span, 10.0, 1E-12);
        assert::close(exp.needle_len, 1.0, 1E-12);
        assert_eq!(exp.seed, None);
        assert!(exp.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_configs() {
        assert_eq!(
            Experiment::default().with_drop_counts(vec![]).validate(),
            Err(ExperimentError::NoDropCounts)
        );
        assert_eq!(
            Experiment::default().with_num_trials(0).validate(),
            Err(ExperimentError::Batch {
                num_drops: 10,
                source: BatchError::NoTrials
            })
        );
        assert_eq!(
            Experiment::default()
                .with_drop_counts(vec![10, 0])
                .validate(),
            Err(ExperimentError::Batch {
                num_drops: 0,
                source: BatchError::NoDrops
            })
        );
        assert_eq!(
            Experiment::default().with_span(0.0).validate(),
            Err(ExperimentError::Table(NeedleDropError::SpanTooLow {
                span: 0.0
            }))
        );
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let exp = Experiment::default()
            .with_num_trials(5)
            .with_drop_counts(vec![100, 1_000])
            .with_policy(DegeneratePolicy::Skip)
            .with_seed(0x1234);
        let a = exp.run().unwrap();
        let b = exp.run().unwrap();
        assert_eq!(a, b);

        let c = exp.clone().with_seed(0x4321).run().unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn batches_follow_drop_count_order() {
        let result = Experiment::default()
            .with_num_trials(3)
            .with_drop_counts(vec![1_000, 100, 500])
            .with_seed(7)
            .run()
            .unwrap();
        let order: Vec<usize> =
            result.batches().iter().map(|b| b.num_drops()).collect();
        assert_eq!(order, vec![1_000, 100, 500]);
        assert_eq!(result.batch(500).map(|b| b.estimates().len()), Some(3));
        assert!(result.batch(42).is_none());
    }
}
