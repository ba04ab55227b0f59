//! Trait definitions
use rand::Rng;

/// A random quantity that can be drawn from
pub trait Sampleable<X> {
    /// Single draw
    ///
    /// # Example
    ///
    /// ```
    /// use buffon::prelude::*;
    ///
    /// let table = NeedleDrop::new(10.0).unwrap();
    /// let mut rng = rand::thread_rng();
    ///
    /// let needle: Needle = table.draw(&mut rng);
    /// assert!(0.0 <= needle.x() && needle.x() < 10.0);
    /// ```
    fn draw<R: Rng>(&self, rng: &mut R) -> X;

    /// Multiple draws
    ///
    /// # Example
    ///
    /// ```
    /// use buffon::prelude::*;
    ///
    /// let table = NeedleDrop::unit_cell();
    /// let mut rng = rand::thread_rng();
    ///
    /// let needles: Vec<Needle> = table.sample(103, &mut rng);
    /// assert_eq!(needles.len(), 103);
    /// ```
    fn sample<R: Rng>(&self, n: usize, mut rng: &mut R) -> Vec<X> {
        (0..n).map(|_| self.draw(&mut rng)).collect()
    }

    /// Create a never-ending iterator of samples
    ///
    /// # Example
    ///
    /// Estimate the crossing probability from a stream of needles
    ///
    /// ```
    /// use buffon::prelude::*;
    ///
    /// let table = NeedleDrop::unit_cell();
    /// let mut rng = rand::thread_rng();
    ///
    /// let n = 10_000;
    /// let n_cross = table
    ///     .sample_stream(&mut rng)
    ///     .take(n)
    ///     .filter(|needle: &Needle| needle.crosses_grid_line())
    ///     .count();
    ///
    /// let p = n_cross as f64 / n as f64;
    /// assert!((p - 2.0 / std::f64::consts::PI).abs() < 0.05);
    /// ```
    fn sample_stream<'r, R: Rng>(
        &'r self,
        mut rng: &'r mut R,
    ) -> Box<dyn Iterator<Item = X> + 'r> {
        Box::new(std::iter::repeat_with(move || self.draw(&mut rng)))
    }
}
