//! A trial: many needle drops reduced to one estimate of π
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::impl_display;
use crate::table::NeedleDrop;
use crate::traits::Sampleable;
use rand::Rng;
use std::fmt;

/// Drops `num_drops` needles onto a table and counts the crossings.
///
/// A `Trial` is itself a random quantity: each draw is a fresh
/// [`TrialOutcome`]. Counting never fails; turning a count into an estimate of
/// π fails when no needle crossed.
///
/// # Example
///
/// ```
/// use buffon::prelude::*;
///
/// let trial = Trial::new(100_000).unwrap();
/// let mut rng = rand::thread_rng();
///
/// let outcome: TrialOutcome = trial.draw(&mut rng);
/// let pi_est = outcome.pi_estimate().unwrap();
/// assert!((pi_est - std::f64::consts::PI).abs() < 0.1);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
#[cfg_attr(feature = "serde1", serde(try_from = "TrialParameters"))]
#[cfg_attr(feature = "serde1", serde(into = "TrialParameters"))]
pub struct Trial {
    num_drops: usize,
    table: NeedleDrop,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct TrialParameters {
    pub num_drops: usize,
    pub table: NeedleDrop,
}

/// The crossing count of one trial
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct TrialOutcome {
    num_drops: usize,
    crossings: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum TrialError {
    /// A trial must drop at least one needle
    NoDrops,
    /// No needle crossed a line, so 2N/crossings is undefined
    NoCrossings { num_drops: usize },
}

impl Trial {
    /// Create a trial of `num_drops` needles dropped onto a single grid cell
    #[inline]
    pub fn new(num_drops: usize) -> Result<Self, TrialError> {
        Trial::with_table(num_drops, NeedleDrop::unit_cell())
    }

    /// Create a trial of `num_drops` needles dropped onto `table`
    #[inline]
    pub fn with_table(
        num_drops: usize,
        table: NeedleDrop,
    ) -> Result<Self, TrialError> {
        if num_drops == 0 {
            Err(TrialError::NoDrops)
        } else {
            Ok(Trial::new_unchecked(num_drops, table))
        }
    }

    /// Creates a new Trial without checking whether `num_drops` is valid.
    #[inline]
    pub fn new_unchecked(num_drops: usize, table: NeedleDrop) -> Self {
        Trial { num_drops, table }
    }

    /// Get the number of needles dropped per trial
    #[inline]
    pub fn num_drops(&self) -> usize {
        self.num_drops
    }

    /// Get the table the needles are dropped on
    #[inline]
    pub fn table(&self) -> &NeedleDrop {
        &self.table
    }

    /// Run the trial and estimate π
    #[inline]
    pub fn run<R: Rng>(&self, rng: &mut R) -> Result<f64, TrialError> {
        self.draw(rng).pi_estimate()
    }
}

impl Sampleable<TrialOutcome> for Trial {
    fn draw<R: Rng>(&self, rng: &mut R) -> TrialOutcome {
        let crossings = self.table.count_crossings(self.num_drops, rng);
        TrialOutcome::new_unchecked(self.num_drops, crossings)
    }
}

impl TryFrom<TrialParameters> for Trial {
    type Error = TrialError;

    fn try_from(params: TrialParameters) -> Result<Self, Self::Error> {
        Trial::with_table(params.num_drops, params.table)
    }
}

impl From<Trial> for TrialParameters {
    fn from(trial: Trial) -> Self {
        TrialParameters {
            num_drops: trial.num_drops,
            table: trial.table,
        }
    }
}

impl TrialOutcome {
    /// Record `crossings` out of `num_drops` needles
    ///
    /// Returns `None` if more needles crossed than were dropped.
    #[inline]
    pub fn new(num_drops: usize, crossings: usize) -> Option<Self> {
        if crossings > num_drops {
            None
        } else {
            Some(TrialOutcome::new_unchecked(num_drops, crossings))
        }
    }

    #[inline]
    pub fn new_unchecked(num_drops: usize, crossings: usize) -> Self {
        TrialOutcome {
            num_drops,
            crossings,
        }
    }

    /// Get the number of needles dropped
    #[inline]
    pub fn num_drops(&self) -> usize {
        self.num_drops
    }

    /// Get the number of needles that crossed a line
    #[inline]
    pub fn crossings(&self) -> usize {
        self.crossings
    }

    /// Fraction of needles that crossed a line. Estimates 2/π.
    #[inline]
    pub fn crossing_rate(&self) -> f64 {
        self.crossings as f64 / self.num_drops as f64
    }

    /// Estimate π as `2 * num_drops / crossings`
    ///
    /// # Example
    ///
    /// ```
    /// # use buffon::{TrialError, TrialOutcome};
    /// let outcome = TrialOutcome::new(100, 64).unwrap();
    /// assert_eq!(outcome.pi_estimate(), Ok(3.125));
    ///
    /// let outcome = TrialOutcome::new(3, 0).unwrap();
    /// assert_eq!(
    ///     outcome.pi_estimate(),
    ///     Err(TrialError::NoCrossings { num_drops: 3 })
    /// );
    /// ```
    pub fn pi_estimate(&self) -> Result<f64, TrialError> {
        if self.num_drops == 0 {
            Err(TrialError::NoDrops)
        } else if self.crossings == 0 {
            Err(TrialError::NoCrossings {
                num_drops: self.num_drops,
            })
        } else {
            Ok(2.0 * self.num_drops as f64 / self.crossings as f64)
        }
    }
}

/// Drop `num_drops` needles onto a single grid cell and estimate π
///
/// # Example
///
/// ```
/// use buffon::{run_trial, TrialError};
///
/// let mut rng = rand::thread_rng();
///
/// let pi_est = run_trial(100_000, &mut rng).unwrap();
/// assert!((pi_est - std::f64::consts::PI).abs() < 0.1);
///
/// assert_eq!(run_trial(0, &mut rng), Err(TrialError::NoDrops));
/// ```
pub fn run_trial<R: Rng>(num_drops: usize, rng: &mut R) -> Result<f64, TrialError> {
    Trial::new(num_drops)?.run(rng)
}

impl From<&Trial> for String {
    fn from(trial: &Trial) -> String {
        format!("Trial(drops: {}, {})", trial.num_drops, trial.table)
    }
}

impl From<&TrialOutcome> for String {
    fn from(outcome: &TrialOutcome) -> String {
        format!("{}/{} crossed", outcome.crossings, outcome.num_drops)
    }
}

impl_display!(Trial);
impl_display!(TrialOutcome);

impl std::error::Error for TrialError {}

impl fmt::Display for TrialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDrops => write!(f, "a trial must drop at least one needle"),
            Self::NoCrossings { num_drops } => write!(
                f,
                "none of {num_drops} needles crossed a line; \
                 the estimate of π is undefined"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_basic_impls;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256Plus;
    use std::f64::consts::PI;

    test_basic_impls!(Trial::new(10).unwrap());

    #[test]
    fn new_rejects_zero_drops() {
        assert_eq!(Trial::new(0), Err(TrialError::NoDrops));
        assert_eq!(
            Trial::with_table(0, NeedleDrop::default()),
            Err(TrialError::NoDrops)
        );
    }

    #[test]
    fn outcome_rejects_more_crossings_than_drops() {
        assert!(TrialOutcome::new(10, 11).is_none());
        assert!(TrialOutcome::new(10, 10).is_some());
    }

    #[test]
    fn pi_estimate_formula() {
        let outcome = TrialOutcome::new(1000, 637).unwrap();
        assert::close(outcome.pi_estimate().unwrap(), 2000.0 / 637.0, 1E-12);
        assert::close(outcome.crossing_rate(), 0.637, 1E-12);
    }

    #[test]
    fn zero_crossings_is_an_error_not_infinity() {
        let outcome = TrialOutcome::new(5, 0).unwrap();
        assert_eq!(
            outcome.pi_estimate(),
            Err(TrialError::NoCrossings { num_drops: 5 })
        );
    }

    #[test]
    fn single_non_crossing_drop_is_degenerate() {
        // Every draw is the midpoint, which lands the needle end exactly on
        // a line: a tie, so no crossing.
        let mut rng = StepRng::new(1 << 63, 0);
        assert_eq!(
            run_trial(1, &mut rng),
            Err(TrialError::NoCrossings { num_drops: 1 })
        );
    }

    #[test]
    fn single_drop_trials_are_often_degenerate() {
        let mut rng = Xoshiro256Plus::seed_from_u64(0x1234);
        let results: Vec<Result<f64, TrialError>> =
            (0..200).map(|_| run_trial(1, &mut rng)).collect();

        let n_degenerate = results.iter().filter(|r| r.is_err()).count();
        // P(no crossing) = 1 - 2/π ≈ 0.36
        assert!(n_degenerate > 30 && n_degenerate < 120);
        assert!(results.iter().flatten().all(|&pi_est| pi_est == 2.0));
    }

    #[test]
    fn large_trial_is_close_to_pi() {
        let mut rng = Xoshiro256Plus::seed_from_u64(0xABCD);
        for _ in 0..3 {
            let pi_est = run_trial(100_000, &mut rng).unwrap();
            assert::close(pi_est, PI, 0.05);
        }
    }

    #[test]
    fn planar_trial_is_close_to_pi() {
        let mut rng = Xoshiro256Plus::seed_from_u64(0xABCD);
        let trial =
            Trial::with_table(100_000, NeedleDrop::new(10.0).unwrap()).unwrap();
        assert::close(trial.run(&mut rng).unwrap(), PI, 0.05);
    }

    #[test]
    fn outcome_draws_count_every_needle() {
        let mut rng = Xoshiro256Plus::seed_from_u64(42);
        let trial = Trial::new(500).unwrap();
        let outcomes: Vec<TrialOutcome> = trial.sample(20, &mut rng);
        assert!(outcomes
            .iter()
            .all(|o| o.num_drops() == 500 && o.crossings() <= 500));
    }

    #[test]
    fn display() {
        let outcome = TrialOutcome::new(10, 6).unwrap();
        assert_eq!(outcome.to_string(), "6/10 crossed");
        assert_eq!(
            Trial::new(10).unwrap().to_string(),
            "Trial(drops: 10, NeedleDrop(span: 1))"
        );
    }
}
