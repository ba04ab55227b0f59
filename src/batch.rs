//! Repeated trials at a fixed drop count
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::consts::PROGRESS_INTERVAL;
use crate::impl_display;
use crate::misc::Summary;
use crate::table::NeedleDrop;
use crate::trial::{Trial, TrialError};
use crate::traits::Sampleable;
use log::{debug, info, warn};
use rand::Rng;
use std::fmt;

/// What a batch does with a trial in which no needle crossed a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum DegeneratePolicy {
    /// Stop the batch and return the error
    #[default]
    Propagate,
    /// Leave the trial out of the estimates
    Skip,
    /// Re-run the trial up to `max_retries` times before giving up
    Retry { max_retries: usize },
}

/// Progress of a running batch, reported after every trial
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Number of trials finished, including degenerate ones
    pub completed: usize,
    /// Number of trials in the batch
    pub num_trials: usize,
    /// Number of needles dropped per trial
    pub num_drops: usize,
}

/// Runs `num_trials` independent trials of `num_drops` needles each.
///
/// # Example
///
/// ```
/// use buffon::{Batch, DegeneratePolicy};
///
/// let batch = Batch::new(50, 1_000)
///     .unwrap()
///     .with_policy(DegeneratePolicy::Skip);
///
/// let mut rng = rand::thread_rng();
/// let result = batch.run(&mut rng).unwrap();
///
/// assert_eq!(result.estimates().len() + result.n_degenerate(), 50);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
#[cfg_attr(feature = "serde1", serde(try_from = "BatchParameters"))]
#[cfg_attr(feature = "serde1", serde(into = "BatchParameters"))]
pub struct Batch {
    num_trials: usize,
    trial: Trial,
    policy: DegeneratePolicy,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct BatchParameters {
    pub num_trials: usize,
    pub trial: Trial,
    #[cfg_attr(feature = "serde1", serde(default))]
    pub policy: DegeneratePolicy,
}

/// The estimates of π from one batch, in the order the trials ran
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct BatchResult {
    num_drops: usize,
    estimates: Vec<f64>,
    /// Trials without crossings that were skipped or retried
    n_degenerate: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum BatchError {
    /// A batch must run at least one trial
    NoTrials,
    /// Each trial must drop at least one needle
    NoDrops,
    /// A trial had no crossings under [`DegeneratePolicy::Propagate`].
    /// `trial_ix` counts from zero; messages number trials from one.
    DegenerateTrial { trial_ix: usize, source: TrialError },
    /// A trial had no crossings on every attempt
    RetriesExhausted { trial_ix: usize, max_retries: usize },
}

impl Batch {
    /// Create a batch of `num_trials` trials of `num_drops` needles each,
    /// dropped onto a single grid cell.
    #[inline]
    pub fn new(num_trials: usize, num_drops: usize) -> Result<Self, BatchError> {
        Batch::with_table(num_trials, num_drops, NeedleDrop::unit_cell())
    }

    /// Create a batch whose needles are dropped onto `table`
    pub fn with_table(
        num_trials: usize,
        num_drops: usize,
        table: NeedleDrop,
    ) -> Result<Self, BatchError> {
        if num_trials == 0 {
            Err(BatchError::NoTrials)
        } else {
            let trial = Trial::with_table(num_drops, table)
                .map_err(|_| BatchError::NoDrops)?;
            Ok(Batch {
                num_trials,
                trial,
                policy: DegeneratePolicy::default(),
            })
        }
    }

    /// Set how trials without crossings are handled
    #[must_use]
    pub fn with_policy(mut self, policy: DegeneratePolicy) -> Self {
        self.policy = policy;
        self
    }

    #[inline]
    pub fn num_trials(&self) -> usize {
        self.num_trials
    }

    #[inline]
    pub fn num_drops(&self) -> usize {
        self.trial.num_drops()
    }

    #[inline]
    pub fn policy(&self) -> DegeneratePolicy {
        self.policy
    }

    /// Run every trial
    pub fn run<R: Rng>(&self, rng: &mut R) -> Result<BatchResult, BatchError> {
        self.run_with_progress(rng, |_| ())
    }

    /// Run every trial, calling `on_progress` after each one
    ///
    /// # Example
    ///
    /// ```
    /// use buffon::Batch;
    ///
    /// let batch = Batch::new(20, 1_000).unwrap();
    /// let mut rng = rand::thread_rng();
    ///
    /// let mut last = 0;
    /// batch
    ///     .run_with_progress(&mut rng, |progress| last = progress.completed)
    ///     .unwrap();
    ///
    /// assert_eq!(last, 20);
    /// ```
    pub fn run_with_progress<R, F>(
        &self,
        rng: &mut R,
        mut on_progress: F,
    ) -> Result<BatchResult, BatchError>
    where
        R: Rng,
        F: FnMut(Progress),
    {
        let num_drops = self.num_drops();
        info!(
            "Initiating {} trials of {} needles",
            self.num_trials, num_drops
        );

        let mut estimates = Vec::with_capacity(self.num_trials);
        let mut n_degenerate = 0;

        for trial_ix in 0..self.num_trials {
            match self.run_one(trial_ix, rng, &mut n_degenerate)? {
                Some(pi_est) => estimates.push(pi_est),
                None => n_degenerate += 1,
            }

            let completed = trial_ix + 1;
            if completed % PROGRESS_INTERVAL == 0 {
                debug!("Trial {} complete", completed);
            }
            on_progress(Progress {
                completed,
                num_trials: self.num_trials,
                num_drops,
            });
        }

        Ok(BatchResult {
            num_drops,
            estimates,
            n_degenerate,
        })
    }

    // Ok(None) means the trial was skipped
    fn run_one<R: Rng>(
        &self,
        trial_ix: usize,
        rng: &mut R,
        n_degenerate: &mut usize,
    ) -> Result<Option<f64>, BatchError> {
        match (self.trial.draw(rng).pi_estimate(), self.policy) {
            (Ok(pi_est), _) => Ok(Some(pi_est)),
            (Err(source), DegeneratePolicy::Propagate) => {
                Err(BatchError::DegenerateTrial { trial_ix, source })
            }
            (Err(_), DegeneratePolicy::Skip) => {
                warn!("Trial {} had no crossings, skipping", trial_ix + 1);
                Ok(None)
            }
            (Err(_), DegeneratePolicy::Retry { max_retries }) => {
                for attempt in 1..=max_retries {
                    warn!(
                        "Trial {} had no crossings, retry {} of {}",
                        trial_ix + 1,
                        attempt,
                        max_retries
                    );
                    *n_degenerate += 1;
                    if let Ok(pi_est) = self.trial.draw(rng).pi_estimate() {
                        return Ok(Some(pi_est));
                    }
                }
                Err(BatchError::RetriesExhausted {
                    trial_ix,
                    max_retries,
                })
            }
        }
    }
}

impl TryFrom<BatchParameters> for Batch {
    type Error = BatchError;

    fn try_from(params: BatchParameters) -> Result<Self, Self::Error> {
        if params.num_trials == 0 {
            Err(BatchError::NoTrials)
        } else {
            Ok(Batch {
                num_trials: params.num_trials,
                trial: params.trial,
                policy: params.policy,
            })
        }
    }
}

impl From<Batch> for BatchParameters {
    fn from(batch: Batch) -> Self {
        BatchParameters {
            num_trials: batch.num_trials,
            trial: batch.trial,
            policy: batch.policy,
        }
    }
}

impl BatchResult {
    /// Get the number of needles dropped per trial
    #[inline]
    pub fn num_drops(&self) -> usize {
        self.num_drops
    }

    /// Get the estimates of π
    #[inline]
    pub fn estimates(&self) -> &[f64] {
        &self.estimates
    }

    /// Get the number of degenerate trials that were skipped or retried
    #[inline]
    pub fn n_degenerate(&self) -> usize {
        self.n_degenerate
    }

    /// Consume the result and return the estimates
    #[inline]
    pub fn into_estimates(self) -> Vec<f64> {
        self.estimates
    }

    /// Mean, variance and range of the estimates. `None` if the batch kept
    /// no estimates.
    pub fn summary(&self) -> Option<Summary> {
        Summary::new(&self.estimates)
    }
}

/// Run `num_trials` trials of `num_drops` needles and return the estimates
/// of π in the order the trials ran.
///
/// Fails on the first trial without crossings; use [`Batch`] with a
/// [`DegeneratePolicy`] to skip or retry those instead.
///
/// # Example
///
/// ```
/// use buffon::run_batch;
///
/// let mut rng = rand::thread_rng();
/// let estimates = run_batch(50, 1_000, &mut rng).unwrap();
///
/// assert_eq!(estimates.len(), 50);
/// ```
pub fn run_batch<R: Rng>(
    num_trials: usize,
    num_drops: usize,
    rng: &mut R,
) -> Result<Vec<f64>, BatchError> {
    Batch::new(num_trials, num_drops)?
        .run(rng)
        .map(BatchResult::into_estimates)
}

impl From<&Batch> for String {
    fn from(batch: &Batch) -> String {
        format!(
            "Batch(trials: {}, drops: {}, policy: {:?})",
            batch.num_trials,
            batch.num_drops(),
            batch.policy
        )
    }
}

impl_display!(Batch);

impl std::error::Error for BatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DegenerateTrial { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTrials => write!(f, "a batch must run at least one trial"),
            Self::NoDrops => {
                write!(f, "each trial must drop at least one needle")
            }
            Self::DegenerateTrial { trial_ix, source } => {
                write!(f, "trial {} failed: {source}", trial_ix + 1)
            }
            Self::RetriesExhausted {
                trial_ix,
                max_retries,
            } => write!(
                f,
                "trial {} had no crossings after {max_retries} retries",
                trial_ix + 1
            ),
        }
    }
}
