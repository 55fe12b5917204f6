use anyhow::Result;
use clap::Parser;

use percolation::{Params, Strategy};

#[derive(Parser)]
#[command(name = "percolation")]
#[command(version)]
#[command(about = "Monte Carlo estimate of the percolation threshold of an N-by-N grid")]
#[command(allow_negative_numbers = true)]
struct Cli {
    /// Grid side length N
    n: i64,

    /// Number of independent trials T
    trials: i64,

    /// Run seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Site selection: rejection or shuffled
    #[arg(long, default_value = "rejection")]
    strategy: Strategy,

    /// Run trials one after another instead of on the thread pool
    #[arg(long)]
    sequential: bool,

    /// Enable verbose logging (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(percolation::logging::env_filter(cli.verbose))
        .with_writer(std::io::stderr)
        .init();

    let params = Params {
        n: cli.n,
        trials: cli.trials,
        seed: cli.seed,
        strategy: cli.strategy,
        parallel: !cli.sequential,
    };

    let (stats, timings) = percolation::estimate(&params)?;

    eprintln!("\nTimings:");
    for t in &timings {
        eprintln!("  {:20} {:8.1} ms", t.name, t.ms);
    }

    println!("{:<23} = {:.6e}", "mean", stats.mean());
    println!("{:<23} = {:.6e}", "stddev", stats.stddev());
    println!(
        "{:<23} = {:.6e}, {:.6e}",
        "95% confidence interval",
        stats.confidence_lo(),
        stats.confidence_hi()
    );

    Ok(())
}
