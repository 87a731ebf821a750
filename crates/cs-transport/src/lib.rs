//! Electron-transport models for CondStat.
//!
//! A junction is modeled as independent conduction channels in parallel:
//! each channel contributes a transmission-derived conductance and the
//! composite junction sums them. The framework sees these as plain
//! [`cs_sim::ModelDefinition`]s; nothing here is special-cased.

pub mod asym_one_site;
pub mod junction;
pub mod observables;
pub mod sym_one_site;

use std::sync::Arc;

use cs_sim::{ModelDefinition, ObservableId};

pub use asym_one_site::AsymOneSiteChannel;
pub use junction::{TransportJunction, CHANNEL_KIND, JUNCTION_KIND};
pub use observables::{
    APPLIED_BIAS, DIFFERENTIAL_CONDUCTANCE, STATIC_CONDUCTANCE, ZERO_BIAS_CONDUCTANCE,
};
pub use sym_one_site::SymOneSiteChannel;

/// Model types usable at the top level of an input file.
pub fn model_definitions() -> Vec<Arc<dyn ModelDefinition>> {
    vec![Arc::new(TransportJunction)]
}

/// Model types usable as submodels (junction channels).
pub fn submodel_definitions() -> Vec<Arc<dyn ModelDefinition>> {
    vec![Arc::new(SymOneSiteChannel), Arc::new(AsymOneSiteChannel)]
}

/// Input-language observable names (matched case-insensitively).
pub fn observable_names() -> &'static [(&'static str, ObservableId)] {
    &[
        ("appliedbias", APPLIED_BIAS),
        ("staticconductance", STATIC_CONDUCTANCE),
        ("differentialconductance", DIFFERENTIAL_CONDUCTANCE),
        ("zerobiasconductance", ZERO_BIAS_CONDUCTANCE),
    ]
}
