//! Levenberg–Marquardt driver over the normal equations.

use cs_core::{Error, Result};
use nalgebra::{DMatrix, DVector};
use serde::Serialize;

use crate::model::FitModel;

const MAX_ITERATIONS: usize = 200;
const MAX_LAMBDA: f64 = 1e12;
const STEP_TOLERANCE: f64 = 1e-10;
const SSE_TOLERANCE: f64 = 1e-12;

/// Outcome of a fit.
#[derive(Debug, Clone, Serialize)]
pub struct FitResult {
    /// Best-fit parameter values.
    pub parameters: Vec<f64>,
    /// Sum of squared residuals at the best fit.
    pub residual_norm: f64,
    /// Whether any starting point converged.
    pub converged: bool,
    /// Iterations spent on the winning starting point.
    pub n_iterations: usize,
}

/// Fit `model` to `(g, density)` rows using the model's default starting
/// points.
pub fn fit(model: &dyn FitModel, data: &[(f64, f64)]) -> Result<FitResult> {
    fit_from(model, data, &model.initial_guesses())
}

/// Fit `model` to `(g, density)` rows from explicit starting points,
/// keeping the lowest sum of squared residuals.
pub fn fit_from(
    model: &dyn FitModel,
    data: &[(f64, f64)],
    guesses: &[Vec<f64>],
) -> Result<FitResult> {
    let rows: Vec<(f64, f64)> =
        data.iter().copied().filter(|&(g, f)| model.accepts(g, f)).collect();
    if rows.len() < model.n_params() {
        return Err(Error::Validation(format!(
            "fit model {} needs at least {} usable data rows, got {}",
            model.name(),
            model.n_params(),
            rows.len()
        )));
    }
    if guesses.is_empty() {
        return Err(Error::Validation(format!(
            "fit model {} supplied no starting points",
            model.name()
        )));
    }

    let mut best: Option<FitResult> = None;
    for guess in guesses {
        if guess.len() != model.n_params() {
            return Err(Error::Validation(format!(
                "starting point has {} parameters, model {} has {}",
                guess.len(),
                model.name(),
                model.n_params()
            )));
        }
        let candidate = minimize(model, &rows, guess.clone());
        let better = match &best {
            None => true,
            Some(b) => {
                (candidate.converged && !b.converged)
                    || (candidate.converged == b.converged
                        && candidate.residual_norm < b.residual_norm)
            }
        };
        if better {
            best = Some(candidate);
        }
    }

    // guesses checked non-empty above
    let mut result = best.ok_or_else(|| Error::Computation("no fit candidate".into()))?;
    model.process_fit_parameters(&mut result.parameters);
    Ok(result)
}

fn sse(model: &dyn FitModel, rows: &[(f64, f64)], params: &[f64]) -> f64 {
    rows.iter().map(|&(g, f)| model.residual(params, g, f).powi(2)).sum()
}

/// One LM descent from one starting point.
fn minimize(model: &dyn FitModel, rows: &[(f64, f64)], mut params: Vec<f64>) -> FitResult {
    let n = rows.len();
    let p = model.n_params();
    let mut lambda = 1e-3;
    let mut current_sse = sse(model, rows, &params);
    let mut converged = false;
    let mut iterations = 0;

    for iter in 0..MAX_ITERATIONS {
        iterations = iter + 1;

        let mut jac = DMatrix::zeros(n, p);
        let mut res = DVector::zeros(n);
        for (i, &(g, f)) in rows.iter().enumerate() {
            res[i] = model.residual(&params, g, f);
            for (j, dj) in model.jacobian(&params, g, f).into_iter().enumerate() {
                jac[(i, j)] = dj;
            }
        }

        let jtj = jac.transpose() * &jac;
        let jtr = jac.transpose() * res;

        // Damped step: (JtJ + lambda * diag(JtJ)) delta = -Jt r. Raising
        // lambda shortens the step until it actually descends.
        let mut stepped = false;
        while lambda < MAX_LAMBDA {
            let mut damped = jtj.clone();
            for j in 0..p {
                damped[(j, j)] += lambda * jtj[(j, j)].max(1e-30);
            }
            let Some(delta) = damped.lu().solve(&(-&jtr)) else {
                lambda *= 10.0;
                continue;
            };
            let trial: Vec<f64> =
                params.iter().zip(delta.iter()).map(|(param, d)| param + d).collect();
            let trial_sse = sse(model, rows, &trial);
            if trial_sse.is_finite() && trial_sse <= current_sse {
                let step = delta.norm();
                let scale = params.iter().map(|v| v * v).sum::<f64>().sqrt().max(1.0);
                let improvement = current_sse - trial_sse;
                params = trial;
                current_sse = trial_sse;
                lambda = (lambda * 0.1).max(1e-12);
                stepped = true;
                if step < STEP_TOLERANCE * scale || improvement < SSE_TOLERANCE * (1.0 + current_sse)
                {
                    converged = true;
                }
                break;
            }
            lambda *= 10.0;
        }

        if converged || !stepped {
            // A starting point that cannot descend at all never converges.
            break;
        }
    }

    FitResult { parameters: params, residual_norm: current_sse, converged, n_iterations: iterations }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SymmetricNonresonant, SymmetricResonant};
    use approx::assert_relative_eq;

    fn resonant_data(gamma: f64, norm: f64) -> Vec<(f64, f64)> {
        (1..100)
            .map(|i| {
                let g = i as f64 / 100.0;
                (g, SymmetricResonant::density(&[gamma, norm], g))
            })
            .collect()
    }

    #[test]
    fn test_recovers_resonant_parameters() {
        let data = resonant_data(9.0, 2.0);
        let result = fit_from(&SymmetricResonant, &data, &[vec![12.0, 1.0]]).unwrap();
        assert!(result.converged);
        assert_relative_eq!(result.parameters[0], 9.0, max_relative = 1e-4);
        assert_relative_eq!(result.parameters[1], 2.0, max_relative = 1e-4);
    }

    #[test]
    fn test_default_guesses_find_the_minimum() {
        let data = resonant_data(9.0, 2.0);
        let result = fit(&SymmetricResonant, &data).unwrap();
        assert!(result.converged);
        assert_relative_eq!(result.parameters[0], 9.0, max_relative = 1e-3);
    }

    #[test]
    fn test_gamma_sign_is_normalized() {
        let data = resonant_data(9.0, 2.0);
        let result = fit_from(&SymmetricResonant, &data, &[vec![-12.0, 1.0]]).unwrap();
        assert!(result.parameters[0] > 0.0);
    }

    #[test]
    fn test_recovers_nonresonant_parameters() {
        let truth = [100.0, 10.0, 1.0];
        let data: Vec<(f64, f64)> = (1..200)
            .map(|i| {
                let g = i as f64 / 2000.0;
                (g, SymmetricNonresonant::density(&truth, g))
            })
            .collect();
        let result =
            fit_from(&SymmetricNonresonant, &data, &[vec![105.0, 10.5, 1.2]]).unwrap();
        assert!(result.converged);
        assert_relative_eq!(result.parameters[0], 100.0, max_relative = 1e-3);
        assert_relative_eq!(result.parameters[1], 10.0, max_relative = 1e-3);
        assert_relative_eq!(result.parameters[2], 1.0, max_relative = 1e-2);
    }

    #[test]
    fn test_too_few_rows_is_an_error() {
        let data = vec![(0.5, 1.0)];
        assert!(fit(&SymmetricResonant, &data).is_err());
    }
}
