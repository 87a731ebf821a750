//! The composite junction model.
//!
//! A junction declares the environment parameters every channel shares
//! (Fermi energy and applied bias) and any number of channel submodels.
//! Channel evaluators receive `[ef, v, <channel parameters>...]`: the
//! junction's own parameters are prepended to each channel's slice of the
//! sampled vector.

use cs_sim::{CompositeSpec, ModelDefinition, ModelKind, ObservableId, ObservableSpec};

use crate::observables::{
    APPLIED_BIAS, DIFFERENTIAL_CONDUCTANCE, STATIC_CONDUCTANCE, ZERO_BIAS_CONDUCTANCE,
};

/// Kind tag required of every junction submodel.
pub const CHANNEL_KIND: ModelKind = ModelKind("transport-channel");

/// Kind tag of the junction itself.
pub const JUNCTION_KIND: ModelKind = ModelKind("transport-junction");

/// Index of the Fermi energy in a routed channel parameter vector.
pub const INDEX_EF: usize = 0;

/// Index of the applied bias in a routed channel parameter vector.
pub const INDEX_V: usize = 1;

/// A junction of independent conduction channels in parallel.
///
/// Channel conductances add, so the three conductance observables are
/// combined over the submodels with a sum; the applied bias is read
/// directly off the junction's own parameters.
pub struct TransportJunction;

impl ModelDefinition for TransportJunction {
    fn name(&self) -> &'static str {
        "TransportJunction"
    }

    fn kind(&self) -> ModelKind {
        JUNCTION_KIND
    }

    fn parameter_names(&self) -> &'static [&'static str] {
        &["ef", "v"]
    }

    fn observables(&self) -> Vec<(ObservableId, ObservableSpec)> {
        let sum: fn(f64, f64) -> f64 = |a, b| a + b;
        vec![
            (APPLIED_BIAS, ObservableSpec::Direct(|p| p[INDEX_V])),
            (STATIC_CONDUCTANCE, ObservableSpec::Combined { combine: sum }),
            (DIFFERENTIAL_CONDUCTANCE, ObservableSpec::Combined { combine: sum }),
            (ZERO_BIAS_CONDUCTANCE, ObservableSpec::Combined { combine: sum }),
        ]
    }

    fn composite(&self) -> Option<CompositeSpec> {
        Some(CompositeSpec { submodel_kind: CHANNEL_KIND })
    }
}
