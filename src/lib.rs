pub mod config;
pub mod error;
pub mod experiment;
pub mod grid;
pub mod logging;
pub mod percolation;
pub mod rng;
pub mod stats;
pub mod union_find;

use std::time::Instant;

use tracing::info;

pub use config::{Params, Strategy};
pub use error::{Error, Result};
pub use experiment::{PercolationStats, TrialOutcome};
pub use percolation::Percolation;

pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

/// Estimate the percolation threshold, timing each stage.
pub fn estimate(params: &Params) -> Result<(PercolationStats, Vec<Timing>)> {
    let mut timings = Vec::new();
    let total_start = Instant::now();

    // 1. Validate arguments and fix the run seed
    let t = Instant::now();
    let (n, trials, seed) = experiment::prepare_run(params)?;
    timings.push(Timing {
        name: "setup",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 2. Independent trials, one fresh grid each
    let t = Instant::now();
    let outcomes = experiment::run_trials(n, trials, seed, params.strategy, params.parallel)?;
    timings.push(Timing {
        name: "trials",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 3. Reduce samples to mean, stddev and interval
    let t = Instant::now();
    let stats = PercolationStats::from_outcomes(n, seed, &outcomes);
    timings.push(Timing {
        name: "statistics",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    let total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
    timings.push(Timing {
        name: "TOTAL",
        ms: total_ms,
    });

    info!(
        mean = stats.mean(),
        stddev = stats.stddev(),
        lo = stats.confidence_lo(),
        hi = stats.confidence_hi(),
        elapsed_ms = total_ms,
        "estimate done"
    );

    Ok((stats, timings))
}
