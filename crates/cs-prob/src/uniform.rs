//! Uniform distribution over a half-open interval.

use std::fmt;

use cs_core::{Error, Result};
use rand::distributions::{Distribution, Uniform as UniformSampler};
use rand::Rng;

/// Uniform distribution over `[low, high)`.
#[derive(Debug, Clone, Copy)]
pub struct Uniform {
    low: f64,
    high: f64,
    sampler: UniformSampler<f64>,
}

impl Uniform {
    /// Requires `low < high`.
    pub fn new(low: f64, high: f64) -> Result<Self> {
        if !low.is_finite() || !high.is_finite() || low >= high {
            return Err(Error::Validation(format!(
                "uniform distribution requires finite low < high, got [{low}, {high})"
            )));
        }
        Ok(Self { low, high, sampler: UniformSampler::new(low, high) })
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.sampler.sample(rng)
    }
}

impl fmt::Display for Uniform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Uniform([{}, {}))", self.low, self.high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_samples_stay_in_range() {
        let dist = Uniform::new(-1.5, 2.5).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let x = dist.sample(&mut rng);
            assert!((-1.5..2.5).contains(&x));
        }
    }

    #[test]
    fn test_invalid_bounds() {
        assert!(Uniform::new(1.0, 1.0).is_err());
        assert!(Uniform::new(2.0, 1.0).is_err());
        assert!(Uniform::new(f64::NAN, 1.0).is_err());
    }
}
