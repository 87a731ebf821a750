//! Degenerate "distribution" that always returns one value.

use std::fmt;

use cs_core::Result;
use rand::Rng;

/// Constant distribution: every sample is `value`.
///
/// Useful for pinning a model parameter (e.g. the Fermi energy) while the
/// others fluctuate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constant {
    value: f64,
}

impl Constant {
    pub fn new(value: f64) -> Result<Self> {
        Ok(Self { value })
    }

    pub fn sample<R: Rng + ?Sized>(&self, _rng: &mut R) -> f64 {
        self.value
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Constant({})", self.value)
    }
}
