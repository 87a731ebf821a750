//! Line shape for resonant tunneling through a symmetric-coupling site.

use crate::model::FitModel;

/// `p(g) = norm / sqrt(g^3 (1-g)) * exp(-gamma^2 (1-g) / (2g))`.
///
/// Residuals are scaled by `1/f`: the density spans orders of magnitude
/// across the peak near `g = 1`, and the scaling keeps the small bins
/// from being ignored.
pub struct SymmetricResonant;

pub const GAMMA: usize = 0;
pub const NORM: usize = 1;

impl SymmetricResonant {
    /// The line shape itself.
    pub fn density(params: &[f64], g: f64) -> f64 {
        let gamma = params[GAMMA];
        let norm = params[NORM];
        norm / (g * g * g * (1.0 - g)).sqrt() * (-0.5 * gamma * gamma * (1.0 - g) / g).exp()
    }
}

impl FitModel for SymmetricResonant {
    fn name(&self) -> &'static str {
        "SymmetricResonant"
    }

    fn n_params(&self) -> usize {
        2
    }

    fn param_names(&self) -> &'static [&'static str] {
        &["gamma", "norm"]
    }

    fn residual(&self, params: &[f64], g: f64, f: f64) -> f64 {
        (Self::density(params, g) - f) / f
    }

    fn jacobian(&self, params: &[f64], g: f64, f: f64) -> Vec<f64> {
        let gamma = params[GAMMA];
        let model = Self::density(params, g);
        let mut row = vec![0.0; 2];
        row[GAMMA] = -gamma * (1.0 - g) / g * model / f;
        row[NORM] = model / params[NORM] / f;
        row
    }

    fn initial_guesses(&self) -> Vec<Vec<f64>> {
        [4.0, 8.0, 16.0, 32.0].iter().map(|&gamma| vec![gamma, 1.0]).collect()
    }

    fn accepts(&self, g: f64, f: f64) -> bool {
        g > 0.0 && g < 1.0 && f > 0.0
    }

    fn process_fit_parameters(&self, params: &mut [f64]) {
        // gamma only enters squared; report it positive.
        params[GAMMA] = params[GAMMA].abs();
    }
}
