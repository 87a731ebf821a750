//! Drive a parsed simulation plan to a histogram file.

use anyhow::{Context, Result};
use cs_hist::Histogram;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::input::SimulationPlan;
use crate::output;

pub fn run_simulation(plan: SimulationPlan, seed: u64) -> Result<()> {
    let SimulationPlan { simulator, styles, trials, output: out_path } = plan;

    tracing::info!(
        model = simulator.model().name(),
        observables = simulator.num_observables(),
        trials,
        seed,
        "starting simulation"
    );

    let mut rng = StdRng::seed_from_u64(seed);
    let mut histogram = Histogram::new(simulator.num_observables())?;
    let mut skipped = 0u64;
    for _ in 0..trials {
        let row = simulator.simulate(&mut rng)?;
        // Non-finite rows (model singularities) are counted and excluded.
        if row.iter().any(|v| !v.is_finite()) {
            skipped += 1;
            continue;
        }
        histogram.add_data(row)?;
    }
    if skipped > 0 {
        tracing::warn!(skipped, trials, "trials produced non-finite observables; excluded");
    }

    let binned = histogram.bin(&styles)?;
    output::write_histogram(&out_path, &binned)
        .with_context(|| format!("writing {}", out_path.display()))?;

    tracing::info!(
        binned = binned.total_count(),
        bins = binned.shape().iter().product::<usize>(),
        output = %out_path.display(),
        "simulation complete"
    );
    Ok(())
}
