//! Binding factory: from a model definition to a finalized `Model`.

use std::sync::Arc;

use cs_core::{Error, Result};
use cs_prob::RandomDistribution;

use crate::model::{Model, ModelDefinition};

/// Incrementally binds distributions and submodels to a model definition,
/// validating completeness when the model is finalized.
pub struct SimulateModelFactory {
    def: Arc<dyn ModelDefinition>,
    dists: Vec<Option<Arc<RandomDistribution>>>,
    submodels: Vec<Model>,
}

impl SimulateModelFactory {
    pub fn new(def: Arc<dyn ModelDefinition>) -> Self {
        let n = def.parameter_names().len();
        Self { def, dists: vec![None; n], submodels: Vec::new() }
    }

    /// Name of the underlying model definition.
    pub fn model_name(&self) -> &'static str {
        self.def.name()
    }

    /// Whether the underlying definition takes submodels.
    pub fn is_composite(&self) -> bool {
        self.def.composite().is_some()
    }

    /// Bind `name` (case-insensitive) to a distribution.
    ///
    /// Returns `true` when the name is one of this model's declared
    /// parameters and the distribution was consumed; `false` otherwise,
    /// without error. The pass-through lets a single input line be offered
    /// to every open model scope until one claims it.
    pub fn set_distribution(&mut self, name: &str, dist: &Arc<RandomDistribution>) -> bool {
        let mut used = false;
        for (slot, declared) in self.dists.iter_mut().zip(self.def.parameter_names()) {
            if declared.eq_ignore_ascii_case(name) {
                *slot = Some(Arc::clone(dist));
                used = true;
            }
        }
        used
    }

    /// Add a finalized submodel.
    ///
    /// Fails if the underlying definition is not composite or if the
    /// submodel's kind differs from the declared requirement.
    pub fn add_submodel(&mut self, submodel: Model) -> Result<()> {
        let spec = self
            .def
            .composite()
            .ok_or_else(|| Error::NotComposite(self.def.name().to_owned()))?;
        if submodel.kind() != spec.submodel_kind {
            return Err(Error::IncompatibleSubmodel(
                submodel.name().to_owned(),
                self.def.name().to_owned(),
            ));
        }
        self.submodels.push(submodel);
        Ok(())
    }

    /// Validate completeness and produce the immutable model.
    pub fn finish(self) -> Result<Model> {
        let mut dists = Vec::with_capacity(self.dists.len());
        for (slot, name) in self.dists.into_iter().zip(self.def.parameter_names()) {
            match slot {
                Some(dist) => dists.push(dist),
                None => return Err(Error::MissingDistribution((*name).to_owned())),
            }
        }
        if self.def.composite().is_some() && self.submodels.is_empty() {
            return Err(Error::NoSubmodels(self.def.name().to_owned()));
        }
        Ok(Model { def: self.def, dists, submodels: self.submodels })
    }
}
