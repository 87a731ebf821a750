//! Normal (Gaussian) distribution.

use std::fmt;

use cs_core::{Error, Result};
use rand::Rng;
use rand_distr::{Distribution, Normal as NormalSampler};

/// Normal distribution `N(mean, stddev)`.
#[derive(Debug, Clone, Copy)]
pub struct Normal {
    mean: f64,
    stddev: f64,
    sampler: NormalSampler<f64>,
}

impl Normal {
    /// Requires `stddev > 0`.
    pub fn new(mean: f64, stddev: f64) -> Result<Self> {
        if !stddev.is_finite() || stddev <= 0.0 {
            return Err(Error::Validation(format!(
                "normal distribution requires stddev > 0, got {stddev}"
            )));
        }
        let sampler = NormalSampler::new(mean, stddev)
            .map_err(|e| Error::Validation(format!("normal distribution: {e}")))?;
        Ok(Self { mean, stddev, sampler })
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.sampler.sample(rng)
    }
}

impl fmt::Display for Normal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Normal(mean = {}, stddev = {})", self.mean, self.stddev)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sample_mean_roughly_centered() {
        let dist = Normal::new(3.0, 0.5).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let n = 20_000;
        let mean = (0..n).map(|_| dist.sample(&mut rng)).sum::<f64>() / n as f64;
        assert!((mean - 3.0).abs() < 0.05);
    }

    #[test]
    fn test_invalid_stddev() {
        assert!(Normal::new(0.0, 0.0).is_err());
        assert!(Normal::new(0.0, -1.0).is_err());
    }
}
