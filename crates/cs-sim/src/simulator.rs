//! The trial loop: one model, an ordered list of observable columns.

use cs_core::{Error, Result};
use rand::Rng;

use crate::model::Model;
use crate::observable::{ObservableFn, ObservableId};

/// Repeatedly samples a model's parameter vector and evaluates the bound
/// observables against it.
pub struct Simulator {
    model: Model,
    columns: Vec<ObservableFn>,
}

impl Simulator {
    pub fn new(model: Model) -> Self {
        Self { model, columns: Vec::new() }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Number of bound output columns.
    pub fn num_observables(&self) -> usize {
        self.columns.len()
    }

    /// Bind output column `index` to the model's evaluator for `id`.
    ///
    /// `index` may overwrite an existing column or extend the list by
    /// exactly one; skipping ahead is an error, as is an observable the
    /// model does not implement.
    pub fn set_observable(&mut self, index: usize, id: ObservableId) -> Result<()> {
        if index > self.columns.len() {
            return Err(Error::Validation(format!(
                "observable index {index} skips ahead of the {} bound columns",
                self.columns.len()
            )));
        }
        let func = self.model.observable(id)?;
        if index < self.columns.len() {
            self.columns[index] = func;
        } else {
            self.columns.push(func);
        }
        Ok(())
    }

    /// Run one trial: sample a parameter vector and evaluate every column
    /// against that same vector, so the values in a row are mutually
    /// consistent.
    pub fn simulate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<f64>> {
        if self.columns.is_empty() {
            return Err(Error::NoObservables);
        }
        let params = self.model.sample_parameters(rng);
        Ok(self.columns.iter().map(|f| f(&params)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{def, PairDef, DIFF, SUM};
    use crate::SimulateModelFactory;
    use cs_prob::{Constant, RandomDistribution, Uniform};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn pair_model(first: RandomDistribution, second: RandomDistribution) -> Model {
        let mut factory = SimulateModelFactory::new(def(PairDef));
        factory.set_distribution("first", &Arc::new(first));
        factory.set_distribution("second", &Arc::new(second));
        factory.finish().unwrap()
    }

    fn constant(v: f64) -> RandomDistribution {
        RandomDistribution::Constant(Constant::new(v).unwrap())
    }

    #[test]
    fn test_simulate_without_observables_fails() {
        let sim = Simulator::new(pair_model(constant(1.0), constant(2.0)));
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(sim.simulate(&mut rng), Err(Error::NoObservables)));
    }

    #[test]
    fn test_column_binding_rules() {
        let mut sim = Simulator::new(pair_model(constant(1.0), constant(2.0)));
        // Skipping ahead is rejected.
        assert!(sim.set_observable(1, SUM).is_err());
        sim.set_observable(0, SUM).unwrap();
        sim.set_observable(1, DIFF).unwrap();
        // Overwriting an existing column is allowed.
        sim.set_observable(0, DIFF).unwrap();
        assert_eq!(sim.num_observables(), 2);
    }

    #[test]
    fn test_rows_are_exact_with_constant_parameters() {
        let mut sim = Simulator::new(pair_model(constant(1.0), constant(2.0)));
        sim.set_observable(0, SUM).unwrap();
        sim.set_observable(1, DIFF).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..10 {
            assert_eq!(sim.simulate(&mut rng).unwrap(), vec![3.0, -1.0]);
        }
    }

    #[test]
    fn test_columns_share_one_parameter_vector() {
        let first = RandomDistribution::Uniform(Uniform::new(-1.0, 1.0).unwrap());
        let second = RandomDistribution::Uniform(Uniform::new(5.0, 6.0).unwrap());
        let mut sim = Simulator::new(pair_model(first, second));
        sim.set_observable(0, SUM).unwrap();
        sim.set_observable(1, DIFF).unwrap();

        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..100 {
            let row = sim.simulate(&mut rng).unwrap();
            // sum + diff = 2 * first, sum - diff = 2 * second: both columns
            // must come from the same draw.
            let first = 0.5 * (row[0] + row[1]);
            let second = 0.5 * (row[0] - row[1]);
            assert!(first > -1.0 - 1e-9 && first < 1.0 + 1e-9);
            assert!(second > 5.0 - 1e-9 && second < 6.0 + 1e-9);
        }
    }
}
