//! The line-oriented simulation input language.
//!
//! ```text
//! observable <name> <nbins> <binstyle> [binstyle-args...]
//! trials <integer>
//! output <filename>
//! model <ModelName>
//!    distribution <paramName> <distKind> <distParams...>
//!    model <SubmodelName>
//!       ...
//!    endmodel
//! endmodel
//! ```
//!
//! Keywords and names are case-insensitive; `#` starts a comment. Model
//! blocks nest: an inner block is finalized on `endmodel` and added to the
//! enclosing factory as a submodel. A `distribution` line is offered to
//! the innermost open scope first and then outward, so a line written
//! inside a channel block can still bind one of the junction's shared
//! parameters. Every problem is reported here, before any trial runs.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use cs_core::Tokens;
use cs_hist::BinStyle;
use cs_prob::RandomDistribution;
use cs_sim::{ModelDefinition, ObservableId, SimulateModelFactory, Simulator};

/// Everything needed to run one simulation.
pub struct SimulationPlan {
    pub simulator: Simulator,
    pub styles: Vec<BinStyle>,
    pub trials: u64,
    pub output: PathBuf,
}

impl std::fmt::Debug for SimulationPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationPlan")
            .field("styles", &self.styles)
            .field("trials", &self.trials)
            .field("output", &self.output)
            .finish_non_exhaustive()
    }
}

/// Per-column observable request.
struct ObservableRequest {
    name: String,
    id: ObservableId,
    style: BinStyle,
}

pub fn parse_simulation(text: &str) -> Result<SimulationPlan> {
    let mut observables: Vec<ObservableRequest> = Vec::new();
    let mut trials: Option<u64> = None;
    let mut output: Option<PathBuf> = None;
    let mut model: Option<cs_sim::Model> = None;
    // Innermost open scope is the last element.
    let mut scopes: Vec<SimulateModelFactory> = Vec::new();

    for (lineno, line) in text.lines().enumerate() {
        let mut tokens = Tokens::from_line(line);
        let Some(keyword) = tokens.next() else { continue };
        let context = |what: &str| format!("line {}: {what}", lineno + 1);

        match keyword.to_lowercase().as_str() {
            "observable" => {
                let name =
                    tokens.expect("observable name").with_context(|| context("observable"))?;
                let id = lookup_observable(&name).with_context(|| context("observable"))?;
                let style =
                    BinStyle::from_tokens(&mut tokens).with_context(|| context("binning"))?;
                observables.push(ObservableRequest { name, id, style });
            }
            "trials" => {
                trials = Some(
                    tokens.next_parse("trial count").with_context(|| context("trials"))?,
                );
            }
            "output" => {
                let name = tokens.expect("output filename").with_context(|| context("output"))?;
                output = Some(PathBuf::from(name));
            }
            "model" => {
                let name = tokens.expect("model name").with_context(|| context("model"))?;
                let def = if scopes.is_empty() {
                    lookup_model(&name).with_context(|| context("model"))?
                } else {
                    lookup_submodel(&name).with_context(|| context("submodel"))?
                };
                scopes.push(SimulateModelFactory::new(def));
            }
            "endmodel" => {
                let factory = scopes
                    .pop()
                    .ok_or_else(|| anyhow!("{}", context("endmodel without an open model")))?;
                let finished = factory.finish().with_context(|| context("model"))?;
                match scopes.last_mut() {
                    Some(parent) => parent
                        .add_submodel(finished)
                        .with_context(|| context("submodel"))?,
                    None => {
                        if model.is_some() {
                            bail!("{}", context("only one top-level model is allowed"));
                        }
                        model = Some(finished);
                    }
                }
            }
            "distribution" => {
                if scopes.is_empty() {
                    bail!("{}", context("distribution outside a model block"));
                }
                let param =
                    tokens.expect("parameter name").with_context(|| context("distribution"))?;
                let dist = Arc::new(
                    RandomDistribution::from_tokens(&mut tokens)
                        .with_context(|| context("distribution"))?,
                );
                // Innermost scope first, then outward.
                let used = scopes
                    .iter_mut()
                    .rev()
                    .any(|scope| scope.set_distribution(&param, &dist));
                if !used {
                    bail!(
                        "{}",
                        context(&format!(
                            "no open model declares a parameter named \"{param}\""
                        ))
                    );
                }
            }
            other => bail!(
                "{}",
                context(&format!(
                    "unrecognized directive \"{other}\"; options are \
                     observable, trials, output, model, endmodel, distribution"
                ))
            ),
        }
    }

    if !scopes.is_empty() {
        bail!("unterminated model block (missing endmodel)");
    }
    let model = model.ok_or_else(|| anyhow!("input declares no model"))?;
    if observables.is_empty() {
        bail!("input declares no observables");
    }
    let trials = trials.ok_or_else(|| anyhow!("input declares no trial count"))?;

    let mut simulator = Simulator::new(model);
    let mut styles = Vec::with_capacity(observables.len());
    for (index, request) in observables.into_iter().enumerate() {
        simulator.set_observable(index, request.id).with_context(|| {
            format!(
                "binding observable \"{}\" to model \"{}\"",
                request.name,
                simulator.model().name()
            )
        })?;
        styles.push(request.style);
    }

    Ok(SimulationPlan {
        simulator,
        styles,
        trials,
        output: output.unwrap_or_else(|| PathBuf::from("histogram.dat")),
    })
}

fn lookup_observable(name: &str) -> Result<ObservableId> {
    cs_transport::observable_names()
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(name))
        .map(|&(_, id)| id)
        .ok_or_else(|| {
            let options: Vec<&str> =
                cs_transport::observable_names().iter().map(|&(n, _)| n).collect();
            anyhow!("unrecognized observable \"{name}\"; options are {}", options.join(", "))
        })
}

fn lookup_model(name: &str) -> Result<Arc<dyn ModelDefinition>> {
    find_def(name, cs_transport::model_definitions())
        .ok_or_else(|| anyhow!("unrecognized model \"{name}\"; options are {}",
            names(&cs_transport::model_definitions())))
}

fn lookup_submodel(name: &str) -> Result<Arc<dyn ModelDefinition>> {
    find_def(name, cs_transport::submodel_definitions())
        .ok_or_else(|| anyhow!("unrecognized submodel \"{name}\"; options are {}",
            names(&cs_transport::submodel_definitions())))
}

fn find_def(
    name: &str,
    defs: Vec<Arc<dyn ModelDefinition>>,
) -> Option<Arc<dyn ModelDefinition>> {
    defs.into_iter().find(|def| def.name().eq_ignore_ascii_case(name))
}

fn names(defs: &[Arc<dyn ModelDefinition>]) -> String {
    defs.iter().map(|def| def.name()).collect::<Vec<_>>().join(", ")
}
