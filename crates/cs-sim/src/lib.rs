//! The CondStat simulator framework.
//!
//! A [`ModelDefinition`] declares a model type's named parameters and the
//! observables it can evaluate; the [`SimulateModelFactory`] binds random
//! distributions (and submodels, for composite types) to produce an
//! immutable [`Model`]; a [`Simulator`] then repeatedly samples parameter
//! vectors and evaluates the requested observable columns.
//!
//! Capabilities are plain data: observable identity and model kind are
//! explicit tags compared structurally, and composite-ness is a submodel
//! list plus a per-observable combiner, not an inheritance branch.

pub mod factory;
pub mod model;
pub mod observable;
pub mod simulator;

pub use factory::SimulateModelFactory;
pub use model::{CompositeSpec, Model, ModelDefinition};
pub use observable::{ModelKind, ObservableFn, ObservableId, ObservableSpec};
pub use simulator::Simulator;

#[cfg(test)]
pub(crate) mod testing {
    //! Minimal model definitions used by the framework's own tests.

    use std::sync::Arc;

    use crate::{CompositeSpec, ModelDefinition, ModelKind, ObservableId, ObservableSpec};

    pub const SUM: ObservableId = ObservableId("test-sum");
    pub const DIFF: ObservableId = ObservableId("test-diff");
    pub const PAIR_KIND: ModelKind = ModelKind("test-pair");
    pub const DUO_KIND: ModelKind = ModelKind("test-duo");

    /// Simple model with two parameters and two direct observables.
    pub struct PairDef;

    impl ModelDefinition for PairDef {
        fn name(&self) -> &'static str {
            "pair"
        }

        fn kind(&self) -> ModelKind {
            PAIR_KIND
        }

        fn parameter_names(&self) -> &'static [&'static str] {
            &["first", "second"]
        }

        fn observables(&self) -> Vec<(ObservableId, ObservableSpec)> {
            vec![
                (SUM, ObservableSpec::Direct(|p| p[0] + p[1])),
                (DIFF, ObservableSpec::Direct(|p| p[0] - p[1])),
            ]
        }
    }

    /// Simple model implementing only the sum observable.
    pub struct SumOnlyDef;

    impl ModelDefinition for SumOnlyDef {
        fn name(&self) -> &'static str {
            "sum-only"
        }

        fn kind(&self) -> ModelKind {
            PAIR_KIND
        }

        fn parameter_names(&self) -> &'static [&'static str] {
            &["first", "second"]
        }

        fn observables(&self) -> Vec<(ObservableId, ObservableSpec)> {
            vec![(SUM, ObservableSpec::Direct(|p| p[0] + p[1]))]
        }
    }

    /// Composite model with no parameters of its own that sums the sum
    /// observable over its pair submodels.
    pub struct DuoDef;

    impl ModelDefinition for DuoDef {
        fn name(&self) -> &'static str {
            "duo"
        }

        fn kind(&self) -> ModelKind {
            DUO_KIND
        }

        fn parameter_names(&self) -> &'static [&'static str] {
            &[]
        }

        fn observables(&self) -> Vec<(ObservableId, ObservableSpec)> {
            vec![(SUM, ObservableSpec::Combined { combine: |a, b| a + b })]
        }

        fn composite(&self) -> Option<CompositeSpec> {
            Some(CompositeSpec { submodel_kind: PAIR_KIND })
        }
    }

    pub fn def(d: impl ModelDefinition + 'static) -> Arc<dyn ModelDefinition> {
        Arc::new(d)
    }
}
