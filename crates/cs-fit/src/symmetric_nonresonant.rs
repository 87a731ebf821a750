//! Line shape for nonresonant (off-resonant) tunneling through a
//! symmetric-coupling site.

use crate::model::FitModel;

/// `p(g) = norm / sqrt(g (1-g)^3) * exp(-(c sqrt(g) - d sqrt(1-g))^2 / (2 (1-g)))`.
pub struct SymmetricNonresonant;

pub const C: usize = 0;
pub const D: usize = 1;
pub const NORM: usize = 2;

impl SymmetricNonresonant {
    pub fn density(params: &[f64], g: f64) -> f64 {
        let c = params[C];
        let d = params[D];
        let norm = params[NORM];
        let cd = c * g.sqrt() - d * (1.0 - g).sqrt();
        norm / (g * (1.0 - g) * (1.0 - g) * (1.0 - g)).sqrt()
            * (-0.5 * cd * cd / (1.0 - g)).exp()
    }
}

impl FitModel for SymmetricNonresonant {
    fn name(&self) -> &'static str {
        "SymmetricNonresonant"
    }

    fn n_params(&self) -> usize {
        3
    }

    fn param_names(&self) -> &'static [&'static str] {
        &["c", "d", "norm"]
    }

    fn residual(&self, params: &[f64], g: f64, f: f64) -> f64 {
        Self::density(params, g) - f
    }

    fn jacobian(&self, params: &[f64], g: f64, _f: f64) -> Vec<f64> {
        let c = params[C];
        let d = params[D];
        let norm = params[NORM];
        let omg = 1.0 - g;
        let cd = c * g.sqrt() - d * omg.sqrt();
        let expcd = (-0.5 * cd * cd / omg).exp();

        let mut row = vec![0.0; 3];
        row[C] = -norm * cd * expcd / (omg * omg * omg.sqrt());
        row[D] = norm * cd * expcd / (omg * omg * g.sqrt());
        row[NORM] = expcd / (omg * (g * omg).sqrt());
        row
    }

    fn initial_guesses(&self) -> Vec<Vec<f64>> {
        let mut guesses = Vec::new();
        for c in [50.0, 100.0, 200.0, 300.0, 400.0, 500.0] {
            for d in [5.0, 10.0, 20.0, 30.0, 40.0, 50.0] {
                guesses.push(vec![c, d, 1.0]);
            }
        }
        guesses
    }

    fn accepts(&self, g: f64, _f: f64) -> bool {
        g > 0.0 && g < 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_peak_sits_where_the_exponent_vanishes() {
        // c sqrt(g) = d sqrt(1-g)  =>  g / (1-g) = (d/c)^2.
        let params = [100.0, 10.0, 1.0];
        let g_peak = 0.01 / 1.01;
        let here = SymmetricNonresonant::density(&params, g_peak);
        assert!(here > SymmetricNonresonant::density(&params, 2.0 * g_peak));
        assert!(here > SymmetricNonresonant::density(&params, 0.5 * g_peak));
    }

    #[test]
    fn test_jacobian_matches_finite_difference() {
        let m = SymmetricNonresonant;
        let params = [100.0, 10.0, 1.0];
        let (g, f) = (0.012, 0.0);
        let row = m.jacobian(&params, g, f);
        for j in 0..3 {
            let h = 1e-6 * params[j].abs();
            let mut up = params.to_vec();
            let mut dn = params.to_vec();
            up[j] += h;
            dn[j] -= h;
            let fd = (m.residual(&up, g, f) - m.residual(&dn, g, f)) / (2.0 * h);
            assert_relative_eq!(row[j], fd, max_relative = 1e-4);
        }
    }
}
