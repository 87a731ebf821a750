//! Least-squares fitting of binned conductance histograms.
//!
//! The simulator writes `(conductance, density)` rows; a [`FitModel`]
//! supplies the closed-form line shape, its residuals and analytic
//! Jacobian, and a grid of starting points; the Levenberg–Marquardt
//! driver in [`lm`] iterates each start and keeps the best fit.

pub mod data;
pub mod lm;
pub mod model;
pub mod symmetric_nonresonant;
pub mod symmetric_resonant;

pub use data::read_histogram_rows;
pub use lm::{fit, fit_from, FitResult};
pub use model::FitModel;
pub use symmetric_nonresonant::SymmetricNonresonant;
pub use symmetric_resonant::SymmetricResonant;

use cs_core::{Error, Result};

/// Look up a fit model by its registry name (case-insensitive).
pub fn fit_model_by_name(name: &str) -> Result<Box<dyn FitModel>> {
    match name.to_lowercase().as_str() {
        "symmetricresonant" => Ok(Box::new(SymmetricResonant)),
        "symmetricnonresonant" => Ok(Box::new(SymmetricNonresonant)),
        other => Err(Error::Parse(format!(
            "unrecognized fit model \"{other}\"; options are \
             SymmetricResonant, SymmetricNonresonant"
        ))),
    }
}
