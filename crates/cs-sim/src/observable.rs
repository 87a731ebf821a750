//! Observable and model identity keys.
//!
//! Identity is structural: an [`ObservableId`] or [`ModelKind`] is just a
//! stable tag string compared by value, so plugin crates can mint keys
//! without any shared runtime-type machinery.

use std::fmt;
use std::sync::Arc;

/// Identity key of an observable capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObservableId(pub &'static str);

impl fmt::Display for ObservableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Runtime tag identifying a model type, used to check that a submodel is
/// of the kind a composite model requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelKind(pub &'static str);

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A bound observable evaluator over a sampled parameter vector.
pub type ObservableFn = Arc<dyn Fn(&[f64]) -> f64 + Send + Sync>;

/// How a model type furnishes an observable.
pub enum ObservableSpec {
    /// Evaluate directly against the model's parameter vector.
    Direct(fn(&[f64]) -> f64),
    /// Evaluate every submodel's observable of the same identity and fold
    /// the results with an associative, commutative combiner.
    Combined { combine: fn(f64, f64) -> f64 },
}
