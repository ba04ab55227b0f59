#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::impl_display;
use itertools::{Itertools, MinMaxResult};

/// Arithmetic mean of `xs`. `None` if `xs` is empty.
///
/// # Example
///
/// ```
/// # use buffon::misc::mean;
/// assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
/// assert_eq!(mean(&[]), None);
/// ```
pub fn mean(xs: &[f64]) -> Option<f64> {
    if xs.is_empty() {
        None
    } else {
        Some(xs.iter().sum::<f64>() / xs.len() as f64)
    }
}

/// Unbiased sample variance of `xs`, using the n - 1 denominator. `None` if
/// there are fewer than two values.
///
/// # Example
///
/// ```
/// # use buffon::misc::sample_variance;
/// let v = sample_variance(&[1.0, 2.0, 3.0, 4.0]).unwrap();
/// assert!((v - 5.0 / 3.0).abs() < 1E-12);
///
/// assert_eq!(sample_variance(&[1.0]), None);
/// ```
pub fn sample_variance(xs: &[f64]) -> Option<f64> {
    if xs.len() < 2 {
        return None;
    }
    let m = mean(xs)?;
    let ss = xs.iter().fold(0.0, |acc, &x| (x - m).mul_add(x - m, acc));
    Some(ss / (xs.len() - 1) as f64)
}

/// Summary statistics of a sequence of estimates
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct Summary {
    pub n: usize,
    pub mean: f64,
    /// Sample variance, zero for a single value
    pub variance: f64,
    pub min: f64,
    pub max: f64,
}

impl Summary {
    /// Summarize `xs`. `None` if `xs` is empty.
    pub fn new(xs: &[f64]) -> Option<Self> {
        let mean = mean(xs)?;
        let (min, max) = match xs.iter().copied().minmax() {
            MinMaxResult::NoElements => return None,
            MinMaxResult::OneElement(x) => (x, x),
            MinMaxResult::MinMax(lo, hi) => (lo, hi),
        };
        Some(Summary {
            n: xs.len(),
            mean,
            variance: sample_variance(xs).unwrap_or(0.0),
            min,
            max,
        })
    }

    /// Sample standard deviation
    #[inline]
    pub fn std(&self) -> f64 {
        self.variance.sqrt()
    }

    /// Standard error of the mean
    #[inline]
    pub fn std_err(&self) -> f64 {
        (self.variance / self.n as f64).sqrt()
    }
}

impl From<&Summary> for String {
    fn from(s: &Summary) -> String {
        format!(
            "n: {}, mean: {:.5}, std: {:.5}, range: [{:.5}, {:.5}]",
            s.n,
            s.mean,
            s.std(),
            s.min,
            s.max
        )
    }
}

impl_display!(Summary);

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1E-12;

    #[test]
    fn mean_of_empty_is_none() {
        assert!(mean(&[]).is_none());
    }

    #[test]
    fn variance_of_constant_is_zero() {
        assert::close(sample_variance(&[3.0; 10]).unwrap(), 0.0, TOL);
    }

    #[test]
    fn summary() {
        let s = Summary::new(&[3.0, 3.5, 2.5, 3.0]).unwrap();
        assert_eq!(s.n, 4);
        assert::close(s.mean, 3.0, TOL);
        assert::close(s.variance, 0.5 / 3.0, TOL);
        assert::close(s.min, 2.5, TOL);
        assert::close(s.max, 3.5, TOL);
        assert::close(s.std_err(), (0.5 / 12.0_f64).sqrt(), TOL);
    }

    #[test]
    fn summary_of_one_value() {
        let s = Summary::new(&[3.2]).unwrap();
        assert::close(s.variance, 0.0, TOL);
        assert::close(s.min, 3.2, TOL);
        assert::close(s.max, 3.2, TOL);
        assert!(Summary::new(&[]).is_none());
    }
}
