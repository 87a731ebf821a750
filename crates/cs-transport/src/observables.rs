//! Observable identities for electron transport.

use cs_sim::ObservableId;

/// The bias applied across the junction.
pub const APPLIED_BIAS: ObservableId = ObservableId("applied-bias");

/// Static conductance `G = I/V`.
pub const STATIC_CONDUCTANCE: ObservableId = ObservableId("static-conductance");

/// Differential conductance `G = dI/dV`.
pub const DIFFERENTIAL_CONDUCTANCE: ObservableId = ObservableId("differential-conductance");

/// Zero-bias limit of the differential conductance.
pub const ZERO_BIAS_CONDUCTANCE: ObservableId = ObservableId("zero-bias-conductance");
