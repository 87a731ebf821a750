//! CondStat CLI

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

mod input;
mod output;
mod run;

#[derive(Parser)]
#[command(name = "condstat")]
#[command(about = "CondStat - conductance histogram simulation and fitting")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation described in the input language
    Simulate {
        /// Input file. Reads stdin when omitted.
        input: Option<PathBuf>,

        /// RNG seed. The fixed default keeps reruns of one input identical.
        #[arg(long, default_value_t = 0xFEED_FACE)]
        seed: u64,
    },

    /// Fit a closed-form line shape to a histogram file
    Fit {
        /// Fit model name (SymmetricResonant, SymmetricNonresonant)
        #[arg(short, long)]
        model: String,

        /// Histogram file written by `simulate`
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for the fit report (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print version
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Simulate { input, seed } => cmd_simulate(input.as_ref(), seed),
        Commands::Fit { model, input, output } => cmd_fit(&model, &input, output.as_ref()),
        Commands::Version => {
            println!("condstat {}", cs_core::VERSION);
            Ok(())
        }
    }
}

fn cmd_simulate(input: Option<&PathBuf>, seed: u64) -> Result<()> {
    let text = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("reading stdin")?;
            buf
        }
    };

    let plan = input::parse_simulation(&text)?;
    run::run_simulation(plan, seed)
}

fn cmd_fit(model_name: &str, input: &PathBuf, output: Option<&PathBuf>) -> Result<()> {
    let model = cs_fit::fit_model_by_name(model_name)?;
    let rows = cs_fit::read_histogram_rows(input)
        .with_context(|| format!("reading {}", input.display()))?;
    tracing::info!(rows = rows.len(), model = model.name(), "fitting histogram");

    let result = cs_fit::fit(model.as_ref(), &rows)?;
    tracing::info!(
        residual_norm = result.residual_norm,
        converged = result.converged,
        "fit complete"
    );

    let report = serde_json::json!({
        "model": model.name(),
        "parameter_names": model.param_names(),
        "parameters": result.parameters,
        "residual_norm": result.residual_norm,
        "converged": result.converged,
        "n_iterations": result.n_iterations,
    });

    match output {
        Some(path) => {
            std::fs::write(path, serde_json::to_string_pretty(&report)?)?;
        }
        None => {
            let summary: Vec<String> = model
                .param_names()
                .iter()
                .zip(&result.parameters)
                .map(|(name, value)| format!("{name} = {value:.4e}"))
                .collect();
            println!("{}: {}", model.name(), summary.join(", "));
        }
    }
    Ok(())
}
