use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::{Distribution, Uniform};

use super::NumericGrid;
use crate::Result;

/// Inclusive lower bound of the initial weights.
pub const WEIGHT_LOW: f32 = -0.2;
/// Exclusive upper bound of the initial weights.
pub const WEIGHT_HIGH: f32 = 0.2;

/// A weight generator sampling a uniform distribution from a single random source.
pub struct WeightGen<R: Rng> {
    rng: R,
    distribution: Uniform<f32>,
}

impl WeightGen<StdRng> {
    /// Creates a new `WeightGen` over the default weight range.
    ///
    /// # Arguments
    /// * `seed` - Seed for the random source, `None` draws one from the OS.
    pub fn seeded(seed: Option<u64>) -> Result<Self> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self::uniform(rng, WEIGHT_LOW, WEIGHT_HIGH)
    }
}

impl<R: Rng> WeightGen<R> {
    /// Creates a new `WeightGen` with a uniform distribution.
    ///
    /// # Arguments
    /// * `rng` - A random number generator.
    /// * `low` - The inclusive lower limit.
    /// * `high` - The exclusive upper limit.
    ///
    /// # Returns
    /// An error if the range is invalid (low >= high).
    pub fn uniform(rng: R, low: f32, high: f32) -> Result<Self> {
        Ok(Self {
            rng,
            distribution: Uniform::new(low, high)?,
        })
    }

    pub fn sample(&mut self) -> f32 {
        self.distribution.sample(&mut self.rng)
    }

    /// Builds a grid whose cells are sampled in row-major order.
    pub fn grid(&mut self, rows: usize, columns: usize) -> NumericGrid {
        NumericGrid::from_fn(rows, columns, |_, _| self.sample())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_weights() {
        let a = WeightGen::seeded(Some(42)).unwrap().grid(6, 5);
        let b = WeightGen::seeded(Some(42)).unwrap().grid(6, 5);
        assert_eq!(a, b);
    }

    #[test]
    fn different_seed_different_weights() {
        let a = WeightGen::seeded(Some(1)).unwrap().grid(6, 5);
        let b = WeightGen::seeded(Some(2)).unwrap().grid(6, 5);
        assert_ne!(a, b);
    }

    #[test]
    fn samples_stay_in_range() {
        let grid = WeightGen::seeded(Some(7)).unwrap().grid(32, 32);
        assert!(grid
            .view()
            .iter()
            .all(|&w| (WEIGHT_LOW..WEIGHT_HIGH).contains(&w)));
    }

    #[test]
    fn empty_range_is_rejected() {
        let rng = StdRng::seed_from_u64(0);
        assert!(WeightGen::uniform(rng, 0.2, 0.2).is_err());
    }
}
