//! Asymmetric-coupling single-site channel.

use cs_sim::{ModelDefinition, ModelKind, ObservableId, ObservableSpec};

use crate::junction::{CHANNEL_KIND, INDEX_EF, INDEX_V};
use crate::observables::{
    DIFFERENTIAL_CONDUCTANCE, STATIC_CONDUCTANCE, ZERO_BIAS_CONDUCTANCE,
};

const INDEX_EPSILON: usize = 2;
const INDEX_GAMMA_L: usize = 3;
const INDEX_GAMMA_R: usize = 4;
const INDEX_A: usize = 5;

/// One site with independent couplings to the two electrodes.
pub struct AsymOneSiteChannel;

impl AsymOneSiteChannel {
    pub fn transmission(e: f64, v: f64, eps: f64, gammal: f64, gammar: f64, a: f64) -> f64 {
        let shift = e - eps - a * v;
        let gsum = gammal + gammar;
        4.0 * gammal * gammar / (4.0 * shift * shift + gsum * gsum)
    }

    pub fn static_g(params: &[f64]) -> f64 {
        let ef = params[INDEX_EF];
        let v = params[INDEX_V];
        let eps = params[INDEX_EPSILON];
        let gammal = params[INDEX_GAMMA_L];
        let gammar = params[INDEX_GAMMA_R];
        let a = params[INDEX_A];
        let gsum = gammal + gammar;

        2.0 * gammal * gammar / (v * gsum)
            * ((2.0 * (ef - eps + (0.5 - a) * v) / gsum).atan()
                - (2.0 * (ef - eps - (0.5 + a) * v) / gsum).atan())
    }

    pub fn diff_g(params: &[f64]) -> f64 {
        let ef = params[INDEX_EF];
        let v = params[INDEX_V];
        let eps = params[INDEX_EPSILON];
        let gammal = params[INDEX_GAMMA_L];
        let gammar = params[INDEX_GAMMA_R];
        let a = params[INDEX_A];

        (0.5 - a) * Self::transmission(ef + 0.5 * v, v, eps, gammal, gammar, a)
            + (0.5 + a) * Self::transmission(ef - 0.5 * v, v, eps, gammal, gammar, a)
    }

    pub fn zero_bias_g(params: &[f64]) -> f64 {
        let ef = params[INDEX_EF];
        let eps = params[INDEX_EPSILON];
        let gammal = params[INDEX_GAMMA_L];
        let gammar = params[INDEX_GAMMA_R];
        Self::transmission(ef, 0.0, eps, gammal, gammar, 0.0)
    }
}

impl ModelDefinition for AsymOneSiteChannel {
    fn name(&self) -> &'static str {
        "AsymOneSiteChannel"
    }

    fn kind(&self) -> ModelKind {
        CHANNEL_KIND
    }

    fn parameter_names(&self) -> &'static [&'static str] {
        &["epsilon", "gammaL", "gammaR", "a"]
    }

    fn observables(&self) -> Vec<(ObservableId, ObservableSpec)> {
        vec![
            (STATIC_CONDUCTANCE, ObservableSpec::Direct(Self::static_g)),
            (DIFFERENTIAL_CONDUCTANCE, ObservableSpec::Direct(Self::diff_g)),
            (ZERO_BIAS_CONDUCTANCE, ObservableSpec::Direct(Self::zero_bias_g)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_transmission_reduces_to_symmetric_case() {
        // gammaL == gammaR == gamma matches the symmetric channel.
        let asym = AsymOneSiteChannel::transmission(0.3, 1.0, 0.0, 0.5, 0.5, 0.1);
        let sym = crate::SymOneSiteChannel::transmission(0.3, 1.0, 0.0, 0.5, 0.1);
        assert_relative_eq!(asym, sym, max_relative = 1e-12);
    }

    #[test]
    fn test_resonant_peak_below_unity_when_asymmetric() {
        let peak = AsymOneSiteChannel::transmission(0.0, 0.0, 0.0, 0.8, 0.2, 0.0);
        // 4 gL gR / (gL + gR)^2 = 0.64.
        assert_relative_eq!(peak, 0.64, max_relative = 1e-12);
        assert!(peak < 1.0);
    }

    #[test]
    fn test_static_conductance_value() {
        let g = AsymOneSiteChannel::static_g(&[0.0, 0.8, 0.0, 0.5, 0.5, 0.0]);
        let expected = 1.25 * 0.8_f64.atan();
        assert_relative_eq!(g, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_diff_conductance_value() {
        let g = AsymOneSiteChannel::diff_g(&[0.0, 0.8, 0.0, 0.5, 0.5, 0.0]);
        assert_relative_eq!(g, 1.0 / 1.64, max_relative = 1e-12);
    }

    #[test]
    fn test_zero_bias_value() {
        let g = AsymOneSiteChannel::zero_bias_g(&[0.0, 0.8, 0.0, 0.5, 0.5, 0.0]);
        assert_relative_eq!(g, 1.0, max_relative = 1e-12);
    }
}
