//! Gamma distribution.

use std::fmt;

use cs_core::{Error, Result};
use rand::Rng;
use rand_distr::{Distribution, Gamma as GammaSampler};

/// Gamma distribution with `shape` and `scale` parameters.
#[derive(Debug, Clone, Copy)]
pub struct Gamma {
    shape: f64,
    scale: f64,
    sampler: GammaSampler<f64>,
}

impl Gamma {
    /// Requires `shape > 0` and `scale > 0`.
    pub fn new(shape: f64, scale: f64) -> Result<Self> {
        if !shape.is_finite() || shape <= 0.0 || !scale.is_finite() || scale <= 0.0 {
            return Err(Error::Validation(format!(
                "gamma distribution requires shape > 0 and scale > 0, got shape = {shape}, scale = {scale}"
            )));
        }
        let sampler = GammaSampler::new(shape, scale)
            .map_err(|e| Error::Validation(format!("gamma distribution: {e}")))?;
        Ok(Self { shape, scale, sampler })
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.sampler.sample(rng)
    }
}

impl fmt::Display for Gamma {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Gamma(shape = {}, scale = {})", self.shape, self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_samples_positive() {
        let dist = Gamma::new(2.0, 1.5).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            assert!(dist.sample(&mut rng) > 0.0);
        }
    }

    #[test]
    fn test_invalid_params() {
        assert!(Gamma::new(0.0, 1.0).is_err());
        assert!(Gamma::new(1.0, 0.0).is_err());
        assert!(Gamma::new(-1.0, -1.0).is_err());
    }
}
