//! Deterministic hue-jitter table.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Default number of entries.
pub const DEFAULT_TABLE_SIZE: usize = 128;

/// Fixed table of pseudo-random values in `[0, 1)`.
///
/// Built once at startup from a seed and handed out by reference, so the same
/// seed always produces the same per-mark colour variation across redraws.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseTable {
    values: Vec<f64>,
}

impl NoiseTable {
    pub fn seeded(seed: u64, len: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let len = len.max(1);
        let values = (0..len).map(|_| rng.r#gen::<f64>()).collect();
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Looks up the value for an arbitrary (possibly negative or fractional) seed.
    pub fn value(&self, seed: f64) -> f64 {
        let index = if seed.is_finite() {
            (seed.round() as i64).rem_euclid(self.values.len() as i64) as usize
        } else {
            0
        };
        self.values[index]
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl Default for NoiseTable {
    fn default() -> Self {
        Self::seeded(0, DEFAULT_TABLE_SIZE)
    }
}
