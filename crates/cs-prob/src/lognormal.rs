//! Lognormal distribution.

use std::fmt;

use cs_core::{Error, Result};
use rand::Rng;
use rand_distr::{Distribution, LogNormal as LogNormalSampler};

/// Lognormal distribution: `ln X ~ N(zeta, sigma)`.
#[derive(Debug, Clone, Copy)]
pub struct LogNormal {
    zeta: f64,
    sigma: f64,
    sampler: LogNormalSampler<f64>,
}

impl LogNormal {
    /// Requires `sigma > 0` (the standard deviation in log-space).
    pub fn new(zeta: f64, sigma: f64) -> Result<Self> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(Error::Validation(format!(
                "lognormal distribution requires sigma > 0, got {sigma}"
            )));
        }
        let sampler = LogNormalSampler::new(zeta, sigma)
            .map_err(|e| Error::Validation(format!("lognormal distribution: {e}")))?;
        Ok(Self { zeta, sigma, sampler })
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.sampler.sample(rng)
    }
}

impl fmt::Display for LogNormal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lognormal(zeta = {}, sigma = {})", self.zeta, self.sigma)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_samples_positive() {
        let dist = LogNormal::new(-2.0, 1.0).unwrap();
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..1000 {
            assert!(dist.sample(&mut rng) > 0.0);
        }
    }

    #[test]
    fn test_invalid_sigma() {
        assert!(LogNormal::new(0.0, 0.0).is_err());
        assert!(LogNormal::new(0.0, -0.3).is_err());
    }
}
