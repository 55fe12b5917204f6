use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::percolation::grid_size_from_signed;

/// How a trial picks the next site to open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Strategy {
    /// Draw uniform (row, col) pairs, skipping ones already open.
    #[default]
    Rejection,
    /// Shuffle every coordinate once and open them in that order.
    Shuffled,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::Rejection => "rejection",
            Strategy::Shuffled => "shuffled",
        })
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "rejection" => Ok(Strategy::Rejection),
            "shuffled" => Ok(Strategy::Shuffled),
            other => Err(format!("unknown strategy '{other}' (expected rejection or shuffled)")),
        }
    }
}

/// Experiment parameters.
#[derive(Clone, Debug)]
pub struct Params {
    /// Grid side length N.
    pub n: i64,
    /// Number of independent trials T.
    pub trials: i64,
    /// Run seed. `None` draws one from the OS.
    pub seed: Option<u64>,
    pub strategy: Strategy,
    /// Spread trials over the rayon pool.
    pub parallel: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            n: 200,
            trials: 100,
            seed: None,
            strategy: Strategy::Rejection,
            parallel: true,
        }
    }
}

impl Params {
    pub fn new(n: i64, trials: i64) -> Self {
        Self {
            n,
            trials,
            ..Self::default()
        }
    }

    /// Checked (grid size, trial count).
    pub fn validate(&self) -> Result<(usize, usize)> {
        let n = grid_size_from_signed(self.n)?;
        if self.trials <= 0 {
            return Err(Error::InvalidArgument {
                name: "trials",
                value: self.trials,
            });
        }
        // Positive i64 always fits in usize on 64-bit targets; saturate elsewhere.
        let trials = usize::try_from(self.trials).unwrap_or(usize::MAX);
        Ok((n, trials))
    }
}
