//! Model definitions and the finalized, immutable `Model`.

use std::sync::Arc;

use cs_core::{Error, Result};
use cs_prob::RandomDistribution;
use rand::Rng;

use crate::observable::{ModelKind, ObservableFn, ObservableId, ObservableSpec};

/// Composite requirements of a model type.
pub struct CompositeSpec {
    /// Kind every submodel must have.
    pub submodel_kind: ModelKind,
}

/// Static description of a model type: its declared parameters and the
/// observables it can evaluate.
///
/// Parameter order is significant: it fixes the layout of the sampled
/// parameter vector. Names are matched case-insensitively when binding.
pub trait ModelDefinition: Send + Sync {
    /// Registry name of the model type.
    fn name(&self) -> &'static str;

    /// Runtime kind tag (submodel compatibility checks).
    fn kind(&self) -> ModelKind;

    /// Names of the parameters this model type declares itself (composite
    /// models do not list their submodels' parameters here).
    fn parameter_names(&self) -> &'static [&'static str];

    /// The observable capability table.
    fn observables(&self) -> Vec<(ObservableId, ObservableSpec)>;

    /// Composite requirements, if this model type takes submodels.
    fn composite(&self) -> Option<CompositeSpec> {
        None
    }
}

/// A finalized model: definition plus one bound distribution per declared
/// parameter and, for composite models, the submodel list.
///
/// Constructed by [`crate::SimulateModelFactory`] and immutable afterwards;
/// one instance is reused across all trials of a run.
pub struct Model {
    pub(crate) def: Arc<dyn ModelDefinition>,
    pub(crate) dists: Vec<Arc<RandomDistribution>>,
    pub(crate) submodels: Vec<Model>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("def", &self.def.name())
            .field("num_dists", &self.dists.len())
            .field("submodels", &self.submodels)
            .finish()
    }
}

impl Model {
    pub fn name(&self) -> &'static str {
        self.def.name()
    }

    pub fn kind(&self) -> ModelKind {
        self.def.kind()
    }

    pub fn submodels(&self) -> &[Model] {
        &self.submodels
    }

    /// Number of parameters declared by this model itself.
    pub fn num_own_parameters(&self) -> usize {
        self.def.parameter_names().len()
    }

    /// Total parameter count: own parameters plus, recursively, those of
    /// every submodel.
    pub fn num_parameters(&self) -> usize {
        self.num_own_parameters()
            + self.submodels.iter().map(Model::num_parameters).sum::<usize>()
    }

    /// Sample one full parameter vector: own parameters in declaration
    /// order, then each submodel's vector in submodel order.
    pub fn sample_parameters<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
        let mut params = Vec::with_capacity(self.num_parameters());
        for dist in &self.dists {
            params.push(dist.sample(rng));
        }
        for submodel in &self.submodels {
            params.extend(submodel.sample_parameters(rng));
        }
        params
    }

    /// Resolve the evaluator for an observable.
    ///
    /// For a combined observable every submodel must implement the same
    /// observable; a submodel that lacks it fails here, at bind time, not
    /// during the run. Each submodel evaluator receives this model's own
    /// parameters followed by that submodel's slice of the vector.
    pub fn observable(&self, id: ObservableId) -> Result<ObservableFn> {
        let spec = self
            .def
            .observables()
            .into_iter()
            .find(|(key, _)| *key == id)
            .map(|(_, spec)| spec)
            .ok_or_else(|| {
                Error::IncompatibleObservable(self.name().to_owned(), id.to_string())
            })?;

        match spec {
            ObservableSpec::Direct(f) => Ok(Arc::new(move |params: &[f64]| f(params))),
            ObservableSpec::Combined { combine } => {
                if self.submodels.is_empty() {
                    return Err(Error::NoSubmodels(self.name().to_owned()));
                }
                let own = self.num_own_parameters();
                let mut pieces: Vec<(usize, usize, ObservableFn)> = Vec::new();
                let mut offset = own;
                for submodel in &self.submodels {
                    let len = submodel.num_parameters();
                    pieces.push((offset, len, submodel.observable(id)?));
                    offset += len;
                }
                Ok(Arc::new(move |params: &[f64]| {
                    let mut acc = None;
                    let mut routed = Vec::new();
                    for (offset, len, f) in &pieces {
                        routed.clear();
                        routed.extend_from_slice(&params[..own]);
                        routed.extend_from_slice(&params[*offset..offset + len]);
                        let value = f(&routed);
                        acc = Some(match acc {
                            None => value,
                            Some(prev) => combine(prev, value),
                        });
                    }
                    // Checked non-empty above.
                    acc.unwrap_or(f64::NAN)
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{def, DuoDef, PairDef, SumOnlyDef, DIFF, SUM};
    use crate::SimulateModelFactory;
    use cs_prob::Constant;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn constant(v: f64) -> Arc<RandomDistribution> {
        Arc::new(RandomDistribution::Constant(Constant::new(v).unwrap()))
    }

    fn pair_model(a: f64, b: f64) -> Model {
        let mut factory = SimulateModelFactory::new(def(PairDef));
        assert!(factory.set_distribution("first", &constant(a)));
        assert!(factory.set_distribution("second", &constant(b)));
        factory.finish().unwrap()
    }

    #[test]
    fn test_simple_model_parameters_and_observables() {
        let model = pair_model(1.5, 2.5);
        assert_eq!(model.num_parameters(), 2);

        let mut rng = StdRng::seed_from_u64(0);
        let params = model.sample_parameters(&mut rng);
        assert_eq!(params, vec![1.5, 2.5]);

        let sum = model.observable(SUM).unwrap();
        let diff = model.observable(DIFF).unwrap();
        assert_eq!(sum(&params), 4.0);
        assert_eq!(diff(&params), -1.0);
    }

    #[test]
    fn test_unsupported_observable_fails_at_bind() {
        let mut factory = SimulateModelFactory::new(def(SumOnlyDef));
        factory.set_distribution("first", &constant(0.0));
        factory.set_distribution("second", &constant(0.0));
        let model = factory.finish().unwrap();
        assert!(matches!(
            model.observable(DIFF),
            Err(Error::IncompatibleObservable(_, _))
        ));
    }

    #[test]
    fn test_composite_parameter_layout() {
        let mut factory = SimulateModelFactory::new(def(DuoDef));
        factory.add_submodel(pair_model(1.0, 2.0)).unwrap();
        factory.add_submodel(pair_model(3.0, 4.0)).unwrap();
        let model = factory.finish().unwrap();

        // No parameters of its own; two submodels with two each.
        assert_eq!(model.num_own_parameters(), 0);
        assert_eq!(model.num_parameters(), 4);

        let mut rng = StdRng::seed_from_u64(0);
        let params = model.sample_parameters(&mut rng);
        assert_eq!(params, vec![1.0, 2.0, 3.0, 4.0]);

        // Combined sum: (1 + 2) + (3 + 4).
        let sum = model.observable(SUM).unwrap();
        assert_eq!(sum(&params), 10.0);
    }

    #[test]
    fn test_combined_requires_observable_on_every_submodel() {
        let mut weak = SimulateModelFactory::new(def(SumOnlyDef));
        weak.set_distribution("first", &constant(0.0));
        weak.set_distribution("second", &constant(0.0));

        let mut factory = SimulateModelFactory::new(def(DuoDef));
        factory.add_submodel(pair_model(1.0, 2.0)).unwrap();
        factory.add_submodel(weak.finish().unwrap()).unwrap();
        let model = factory.finish().unwrap();

        assert!(model.observable(SUM).is_ok());
        // DuoDef only registers SUM, so DIFF is incompatible at the top.
        assert!(model.observable(DIFF).is_err());
    }
}
