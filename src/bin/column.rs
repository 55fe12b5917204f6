use anyhow::{Result, bail};
use tracing::info;

use percolation::Percolation;

/// Opens the left column of an N-by-N grid (row 1, then 3, then 2, then the
/// rest in order) and reports site and system state.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(percolation::logging::env_filter(false))
        .with_writer(std::io::stderr)
        .init();

    let n: i64 = match std::env::args().nth(1) {
        Some(s) => s.parse()?,
        None => 4,
    };
    if n < 3 {
        bail!("column demo needs N >= 3, got {n}");
    }

    let mut grid = Percolation::new(n)?;
    let mut order = vec![1, 3, 2];
    order.extend(4..=grid.size());
    for row in order {
        grid.open(row, 1)?;
        let full = grid.is_full(row, 1)?;
        let percolates = grid.percolates();
        info!(row, full, percolates, "opened");
    }

    println!("{}", grid.is_open(3, 1)?);
    println!("{}", grid.is_full(3, 1)?);
    println!("{}", grid.percolates());
    Ok(())
}
