//! Random needle drops onto a ruled table
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::consts::{CROSSING_PROB, DEFAULT_SPAN, GRID_SPACING, NEEDLE_LEN, TWO_PI};
use crate::impl_display;
use crate::needle::Needle;
use crate::traits::Sampleable;
use rand::Rng;
use rand_distr::Uniform;
use std::fmt;

/// A square table of side `span` ruled with vertical lines one
/// [`GRID_SPACING`] apart, onto which needles of length [`NEEDLE_LEN`] are
/// dropped.
///
/// Needle centers are uniform on `[0, span) × [0, span)` and angles are
/// uniform on `[0, 2π)`. Only the short-needle case, where the needle length
/// equals the grid spacing, is supported: the crossing probability is then
/// 2/π.
///
/// # Example
///
/// ```
/// use buffon::prelude::*;
///
/// let table = NeedleDrop::new(10.0).unwrap();
/// let mut rng = rand::thread_rng();
///
/// let needles: Vec<Needle> = table.sample(1_000, &mut rng);
/// assert!(needles.iter().all(|n| n.y() < 10.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
#[cfg_attr(feature = "serde1", serde(try_from = "NeedleDropParameters"))]
#[cfg_attr(feature = "serde1", serde(into = "NeedleDropParameters"))]
pub struct NeedleDrop {
    span: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct NeedleDropParameters {
    pub span: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum NeedleDropError {
    /// The span is less than or equal to zero
    SpanTooLow { span: f64 },
    /// The span is infinite or NaN
    SpanNotFinite { span: f64 },
    /// The needle length differs from the grid spacing, so 2N/crossings is
    /// not an estimate of π
    NotShortNeedle { needle_len: f64 },
}

impl NeedleDrop {
    /// Create a table of side `span`
    #[inline]
    pub fn new(span: f64) -> Result<Self, NeedleDropError> {
        if span <= 0.0 {
            Err(NeedleDropError::SpanTooLow { span })
        } else if !span.is_finite() {
            Err(NeedleDropError::SpanNotFinite { span })
        } else {
            Ok(NeedleDrop::new_unchecked(span))
        }
    }

    /// Create a table of side `span` for needles of length `needle_len`.
    ///
    /// # Example
    ///
    /// ```
    /// # use buffon::NeedleDrop;
    /// assert!(NeedleDrop::with_needle_len(10.0, 1.0).is_ok());
    ///
    /// // Long and short needles need a different estimator
    /// assert!(NeedleDrop::with_needle_len(10.0, 2.0).is_err());
    /// assert!(NeedleDrop::with_needle_len(10.0, 0.5).is_err());
    /// ```
    #[allow(clippy::float_cmp)]
    pub fn with_needle_len(
        span: f64,
        needle_len: f64,
    ) -> Result<Self, NeedleDropError> {
        if needle_len != GRID_SPACING {
            Err(NeedleDropError::NotShortNeedle { needle_len })
        } else {
            NeedleDrop::new(span)
        }
    }

    /// Creates a new NeedleDrop without checking whether the span is valid.
    #[inline]
    pub fn new_unchecked(span: f64) -> Self {
        NeedleDrop { span }
    }

    /// A table one grid cell wide.
    ///
    /// Crossing depends only on where the center falls relative to the
    /// nearest line, so by periodicity this gives the same crossing
    /// probability as any wider table.
    #[inline]
    pub fn unit_cell() -> Self {
        NeedleDrop::new_unchecked(GRID_SPACING)
    }

    /// Get the side length of the table
    #[inline]
    pub fn span(&self) -> f64 {
        self.span
    }

    /// Get the length of the needles dropped on this table
    #[inline]
    pub fn needle_len(&self) -> f64 {
        NEEDLE_LEN
    }

    /// The probability that a dropped needle crosses a line, 2/π
    #[inline]
    pub fn crossing_probability(&self) -> f64 {
        CROSSING_PROB
    }

    /// Drop one needle and report only whether it crosses a line.
    ///
    /// Skips the vertical coordinate, which never affects crossing.
    pub fn drop_crosses<R: Rng>(&self, rng: &mut R) -> bool {
        let x_dist = Uniform::new(0.0, self.span);
        let theta_dist = Uniform::new(0.0, TWO_PI);
        crosses(rng.sample(x_dist), rng.sample(theta_dist))
    }

    /// Drop `n` needles and count how many cross a line
    ///
    /// # Example
    ///
    /// ```
    /// # use buffon::NeedleDrop;
    /// let table = NeedleDrop::unit_cell();
    /// let mut rng = rand::thread_rng();
    ///
    /// let n_cross = table.count_crossings(1_000, &mut rng);
    /// assert!(n_cross <= 1_000);
    /// ```
    pub fn count_crossings<R: Rng>(&self, n: usize, rng: &mut R) -> usize {
        let x_dist = Uniform::new(0.0, self.span);
        let theta_dist = Uniform::new(0.0, TWO_PI);
        (0..n)
            .filter(|_| crosses(rng.sample(x_dist), rng.sample(theta_dist)))
            .count()
    }
}

#[inline]
fn crosses(x: f64, theta: f64) -> bool {
    Needle::new_unchecked(x, 0.0, theta, NEEDLE_LEN).crosses_grid_line()
}

impl Default for NeedleDrop {
    fn default() -> Self {
        NeedleDrop::new_unchecked(DEFAULT_SPAN)
    }
}

impl TryFrom<NeedleDropParameters> for NeedleDrop {
    type Error = NeedleDropError;

    fn try_from(params: NeedleDropParameters) -> Result<Self, Self::Error> {
        NeedleDrop::new(params.span)
    }
}

impl From<NeedleDrop> for NeedleDropParameters {
    fn from(table: NeedleDrop) -> Self {
        NeedleDropParameters { span: table.span }
    }
}

impl From<&NeedleDrop> for String {
    fn from(table: &NeedleDrop) -> String {
        format!("NeedleDrop(span: {})", table.span)
    }
}

impl_display!(NeedleDrop);

impl Sampleable<Needle> for NeedleDrop {
    fn draw<R: Rng>(&self, rng: &mut R) -> Needle {
        let pos_dist = Uniform::new(0.0, self.span);
        let x = rng.sample(pos_dist);
        let y = rng.sample(pos_dist);
        let theta = rng.sample(Uniform::new(0.0, TWO_PI));
        Needle::new_unchecked(x, y, theta, NEEDLE_LEN)
    }

    fn sample<R: Rng>(&self, n: usize, rng: &mut R) -> Vec<Needle> {
        let pos_dist = Uniform::new(0.0, self.span);
        let theta_dist = Uniform::new(0.0, TWO_PI);
        (0..n)
            .map(|_| {
                let x = rng.sample(pos_dist);
                let y = rng.sample(pos_dist);
                let theta = rng.sample(theta_dist);
                Needle::new_unchecked(x, y, theta, NEEDLE_LEN)
            })
            .collect()
    }
}

/// Drop one needle onto a table of side `span`
///
/// # Example
///
/// ```
/// use buffon::sample_needle;
///
/// let mut rng = rand::thread_rng();
/// let needle = sample_needle(10.0, &mut rng).unwrap();
/// assert_eq!(needle.length(), 1.0);
///
/// assert!(sample_needle(-1.0, &mut rng).is_err());
/// ```
pub fn sample_needle<R: Rng>(
    span: f64,
    rng: &mut R,
) -> Result<Needle, NeedleDropError> {
    NeedleDrop::new(span).map(|table| table.draw(rng))
}

impl std::error::Error for NeedleDropError {}

impl fmt::Display for NeedleDropError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SpanTooLow { span } => {
                write!(f, "span ({span}) must be greater than zero")
            }
            Self::SpanNotFinite { span } => write!(f, "non-finite span: {span}"),
            Self::NotShortNeedle { needle_len } => write!(
                f,
                "needle length ({needle_len}) must equal the grid spacing \
                 ({GRID_SPACING})"
            ),
        }
    }
}
