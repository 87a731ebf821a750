//! Symmetric-coupling single-site channel.

use cs_sim::{ModelDefinition, ModelKind, ObservableId, ObservableSpec};

use crate::junction::{CHANNEL_KIND, INDEX_EF, INDEX_V};
use crate::observables::{
    DIFFERENTIAL_CONDUCTANCE, STATIC_CONDUCTANCE, ZERO_BIAS_CONDUCTANCE,
};

/// Index of the site energy in a routed parameter vector.
const INDEX_EPSILON: usize = 2;
/// Index of the site-lead coupling.
const INDEX_GAMMA: usize = 3;
/// Index of the bias-drop scaling factor.
const INDEX_A: usize = 4;

/// One site coupled symmetrically to both electrodes.
///
/// Parameters (beyond the junction's `ef` and `v`): the site energy
/// `epsilon`, the site-lead coupling `gamma`, and the bias-drop factor
/// `a` describing how the level shifts with the applied bias.
pub struct SymOneSiteChannel;

impl SymOneSiteChannel {
    /// Landauer transmission through the level at energy `e`.
    pub fn transmission(e: f64, v: f64, eps: f64, gamma: f64, a: f64) -> f64 {
        let shift = e - eps - a * v;
        gamma * gamma / (shift * shift + gamma * gamma)
    }

    /// Static conductance `I/V` for a routed parameter vector.
    pub fn static_g(params: &[f64]) -> f64 {
        let ef = params[INDEX_EF];
        let v = params[INDEX_V];
        let eps = params[INDEX_EPSILON];
        let gamma = params[INDEX_GAMMA];
        let a = params[INDEX_A];

        gamma / v
            * (((ef - eps + (0.5 - a) * v) / gamma).atan()
                - ((ef - eps - (0.5 + a) * v) / gamma).atan())
    }

    /// Differential conductance `dI/dV` for a routed parameter vector.
    pub fn diff_g(params: &[f64]) -> f64 {
        let ef = params[INDEX_EF];
        let v = params[INDEX_V];
        let eps = params[INDEX_EPSILON];
        let gamma = params[INDEX_GAMMA];
        let a = params[INDEX_A];

        (0.5 - a) * Self::transmission(ef + 0.5 * v, v, eps, gamma, a)
            + (0.5 + a) * Self::transmission(ef - 0.5 * v, v, eps, gamma, a)
    }

    /// Zero-bias conductance: the transmission at the Fermi energy.
    pub fn zero_bias_g(params: &[f64]) -> f64 {
        let ef = params[INDEX_EF];
        let eps = params[INDEX_EPSILON];
        let gamma = params[INDEX_GAMMA];
        Self::transmission(ef, 0.0, eps, gamma, 0.0)
    }
}

impl ModelDefinition for SymOneSiteChannel {
    fn name(&self) -> &'static str {
        "SymOneSiteChannel"
    }

    fn kind(&self) -> ModelKind {
        CHANNEL_KIND
    }

    fn parameter_names(&self) -> &'static [&'static str] {
        &["epsilon", "gamma", "a"]
    }

    fn observables(&self) -> Vec<(ObservableId, ObservableSpec)> {
        vec![
            (STATIC_CONDUCTANCE, ObservableSpec::Direct(Self::static_g)),
            (DIFFERENTIAL_CONDUCTANCE, ObservableSpec::Direct(Self::diff_g)),
            (ZERO_BIAS_CONDUCTANCE, ObservableSpec::Direct(Self::zero_bias_g)),
        ]
    }
}
