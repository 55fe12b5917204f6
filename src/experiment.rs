use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::{Params, Strategy};
use crate::error::Result;
use crate::percolation::Percolation;
use crate::rng::{RandomSource, create_rng, fresh_seed, trial_seed};
use crate::stats;

/// Result of one open-until-percolates run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrialOutcome {
    /// Sites open at the moment the system first percolated.
    pub open_sites: usize,
    /// `open_sites / (n * n)`.
    pub fraction: f64,
}

/// Opens random sites on a fresh `n`x`n` grid until it percolates.
///
/// Both strategies open a uniformly random blocked site at every step; they
/// differ only in how many draws that costs.
pub fn run_trial<R: RandomSource>(n: usize, strategy: Strategy, rng: &mut R) -> Result<TrialOutcome> {
    let mut grid = Percolation::with_size(n)?;

    match strategy {
        Strategy::Rejection => {
            while !grid.percolates() {
                let row = rng.uniform_range(1, n + 1);
                let col = rng.uniform_range(1, n + 1);
                if !grid.is_open(row, col)? {
                    grid.open(row, col)?;
                }
            }
        }
        Strategy::Shuffled => {
            let mut order: Vec<usize> = (0..n * n).collect();
            rng.shuffle(&mut order);
            for i in order {
                if grid.percolates() {
                    break;
                }
                grid.open(i / n + 1, i % n + 1)?;
            }
        }
    }

    let open_sites = grid.number_of_open_sites();
    Ok(TrialOutcome {
        open_sites,
        fraction: open_sites as f64 / (n * n) as f64,
    })
}

/// Validates `params`, fixes the run seed (drawing one if none was given)
/// and logs the run. Returns (grid size, trial count, seed).
pub fn prepare_run(params: &Params) -> Result<(usize, usize, u64)> {
    let (n, trials) = params.validate()?;
    let seed = params.seed.unwrap_or_else(fresh_seed);
    info!(
        n,
        trials,
        seed,
        strategy = %params.strategy,
        parallel = params.parallel,
        "running percolation trials"
    );
    Ok((n, trials, seed))
}

/// Runs `trials` independent trials. Trial `t` draws from its own RNG seeded by
/// `trial_seed(seed, t)`, so the output is the same with or without `parallel`.
pub fn run_trials(
    n: usize,
    trials: usize,
    seed: u64,
    strategy: Strategy,
    parallel: bool,
) -> Result<Vec<TrialOutcome>> {
    let run = |t: usize| -> Result<TrialOutcome> {
        let mut rng = create_rng(trial_seed(seed, t as u64));
        let outcome = run_trial(n, strategy, &mut rng)?;
        debug!(trial = t, open_sites = outcome.open_sites, fraction = outcome.fraction, "trial done");
        Ok(outcome)
    };

    // Indexed collect: slot t holds trial t regardless of scheduling.
    if parallel {
        (0..trials).into_par_iter().map(run).collect()
    } else {
        (0..trials).map(run).collect()
    }
}

/// Monte Carlo estimate of the percolation threshold of an `n`x`n` grid.
#[derive(Clone, Debug)]
pub struct PercolationStats {
    n: usize,
    seed: u64,
    samples: Vec<f64>,
    mean: f64,
    stddev: f64,
}

impl PercolationStats {
    /// Runs `trials` sequential rejection-sampling trials with a fresh seed.
    ///
    /// # Errors
    /// `InvalidArgument` if `n <= 0` or `trials <= 0`.
    pub fn new(n: i64, trials: i64) -> Result<Self> {
        Self::with_params(&Params {
            n,
            trials,
            seed: None,
            strategy: Strategy::Rejection,
            parallel: false,
        })
    }

    pub fn with_params(params: &Params) -> Result<Self> {
        let (n, trials, seed) = prepare_run(params)?;
        let outcomes = run_trials(n, trials, seed, params.strategy, params.parallel)?;
        Ok(Self::from_outcomes(n, seed, &outcomes))
    }

    /// Reduces finished trials to summary statistics.
    pub fn from_outcomes(n: usize, seed: u64, outcomes: &[TrialOutcome]) -> Self {
        let samples: Vec<f64> = outcomes.iter().map(|o| o.fraction).collect();
        let mean = stats::mean(&samples);
        let stddev = stats::std_dev(&samples);
        Self {
            n,
            seed,
            samples,
            mean,
            stddev,
        }
    }

    pub fn grid_size(&self) -> usize {
        self.n
    }

    pub fn trials(&self) -> usize {
        self.samples.len()
    }

    /// Seed the run was drawn from; pass it back in `Params::seed` to reproduce.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Open-site fraction of each trial, in trial order.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample standard deviation. NaN for a single trial.
    pub fn stddev(&self) -> f64 {
        self.stddev
    }

    pub fn confidence_lo(&self) -> f64 {
        stats::confidence_interval_95(self.mean, self.stddev, self.trials()).0
    }

    pub fn confidence_hi(&self) -> f64 {
        stats::confidence_interval_95(self.mean, self.stddev, self.trials()).1
    }
}
