use tracing::trace;

use crate::error::{Error, Result};
use crate::grid::{Grid, neighbors4};
use crate::union_find::UnionFind;

/// N-by-N percolation system. Sites start blocked and are opened one at a time.
///
/// Rows and columns are 1-indexed at the API. Internally site `(row, col)` is
/// forest element `(row-1)*N + (col-1)`; two extra elements stand for the whole
/// top row (`N*N`) and the whole bottom row (`N*N + 1`), so "does the system
/// percolate" is a single connectivity query between them.
///
/// `full` is a second forest with only the top node. Without it, once the
/// system percolates every site joined to the bottom row would also look
/// joined to the top through the bottom node (backwash).
#[derive(Debug, Clone)]
pub struct Percolation {
    n: usize,
    open: Grid<bool>,
    open_sites: usize,
    flow: UnionFind,
    full: UnionFind,
}

impl Percolation {
    /// All sites blocked.
    ///
    /// # Errors
    /// `InvalidArgument` if `n <= 0`; `GridTooLarge` if the forests for an
    /// `n`x`n` grid cannot be addressed in memory.
    pub fn new(n: i64) -> Result<Self> {
        Self::with_size(grid_size_from_signed(n)?)
    }

    /// Same as [`Percolation::new`] for a size that is already unsigned.
    pub fn with_size(n: usize) -> Result<Self> {
        let n = checked_grid_size(n)?;
        let sites = n * n;
        Ok(Self {
            n,
            open: Grid::new(n, n),
            open_sites: 0,
            flow: UnionFind::new(sites + 2),
            full: UnionFind::new(sites + 1),
        })
    }

    pub fn size(&self) -> usize {
        self.n
    }

    pub fn number_of_open_sites(&self) -> usize {
        self.open_sites
    }

    #[inline]
    fn top(&self) -> usize {
        self.n * self.n
    }

    #[inline]
    fn bottom(&self) -> usize {
        self.n * self.n + 1
    }

    /// Validates a 1-indexed coordinate and converts it to grid (x, y).
    fn site(&self, row: usize, col: usize) -> Result<(usize, usize)> {
        if row == 0 || row > self.n || col == 0 || col > self.n {
            return Err(Error::OutOfBounds { row, col, n: self.n });
        }
        Ok((col - 1, row - 1))
    }

    /// Opens site (row, col). Opening an open site does nothing.
    pub fn open(&mut self, row: usize, col: usize) -> Result<()> {
        let (x, y) = self.site(row, col)?;
        if self.open.get(x, y) {
            return Ok(());
        }
        self.open.set(x, y, true);
        self.open_sites += 1;

        let i = self.open.idx(x, y);
        for (nx, ny) in neighbors4(x, y, self.n, self.n) {
            if self.open.get(nx, ny) {
                let j = self.open.idx(nx, ny);
                self.flow.union(i, j);
                self.full.union(i, j);
            }
        }

        if y == 0 {
            let top = self.top();
            self.flow.union(i, top);
            self.full.union(i, top);
            trace!(row, col, "site joined to top");
        }
        if y == self.n - 1 {
            let bottom = self.bottom();
            self.flow.union(i, bottom);
            trace!(row, col, "site joined to bottom");
        }
        Ok(())
    }

    pub fn is_open(&self, row: usize, col: usize) -> Result<bool> {
        let (x, y) = self.site(row, col)?;
        Ok(self.open.get(x, y))
    }

    /// Is site (row, col) open and connected to the top row through open sites?
    pub fn is_full(&mut self, row: usize, col: usize) -> Result<bool> {
        let (x, y) = self.site(row, col)?;
        let i = self.open.idx(x, y);
        let top = self.top();
        Ok(self.full.connected(i, top))
    }

    /// Is there an open path from the top row to the bottom row?
    pub fn percolates(&mut self) -> bool {
        let (top, bottom) = (self.top(), self.bottom());
        self.flow.connected(top, bottom)
    }
}

/// Checks a signed grid size and returns it as `usize`.
pub(crate) fn grid_size_from_signed(n: i64) -> Result<usize> {
    if n <= 0 {
        return Err(Error::InvalidArgument { name: "n", value: n });
    }
    let n = usize::try_from(n).map_err(|_| Error::GridTooLarge { n: n as u64 })?;
    checked_grid_size(n)
}

/// Rejects zero, and any `n` whose widest buffer (a forest of `n*n + 2`
/// `usize`s) would exceed `isize::MAX` bytes.
pub(crate) fn checked_grid_size(n: usize) -> Result<usize> {
    if n == 0 {
        return Err(Error::InvalidArgument { name: "n", value: 0 });
    }
    let fits = n
        .checked_mul(n)
        .and_then(|sites| sites.checked_add(2))
        .and_then(|elems| elems.checked_mul(size_of::<usize>()))
        .is_some_and(|bytes| bytes <= isize::MAX as usize);
    if !fits {
        return Err(Error::GridTooLarge { n: n as u64 });
    }
    Ok(n)
}


#[cfg(test)]
mod proptests {
    use super::Percolation;
    use crate::grid::neighbors4;
    use proptest::prelude::*;

    /// Flood fill from every open top-row site.
    fn reference_full(n: usize, open: &[(usize, usize)]) -> Vec<bool> {
        let mut is_open = vec![false; n * n];
        for &(r, c) in open {
            is_open[(r - 1) * n + (c - 1)] = true;
        }
        let mut full = vec![false; n * n];
        let mut stack: Vec<usize> = (0..n).filter(|&c| is_open[c]).collect();
        for &i in &stack {
            full[i] = true;
        }
        while let Some(i) = stack.pop() {
            let (x, y) = (i % n, i / n);
            for (nx, ny) in neighbors4(x, y, n, n) {
                let j = ny * n + nx;
                if is_open[j] && !full[j] {
                    full[j] = true;
                    stack.push(j);
                }
            }
        }
        full
    }

    fn sites(max_n: usize) -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
        (1..=max_n).prop_flat_map(|n| {
            (Just(n), proptest::collection::vec((1..=n, 1..=n), 0..(n * n * 2)))
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn matches_flood_fill((n, open) in sites(7)) {
            let mut p = Percolation::new(n as i64).unwrap();
            for &(r, c) in &open {
                p.open(r, c).unwrap();
            }
            let full = reference_full(n, &open);
            for r in 1..=n {
                for c in 1..=n {
                    prop_assert_eq!(p.is_full(r, c).unwrap(), full[(r - 1) * n + (c - 1)]);
                }
            }
            let reaches_bottom = (0..n).any(|c| full[(n - 1) * n + c]);
            prop_assert_eq!(p.percolates(), reaches_bottom);
        }

        #[test]
        fn full_implies_open((n, open) in sites(6)) {
            let mut p = Percolation::new(n as i64).unwrap();
            for &(r, c) in &open {
                p.open(r, c).unwrap();
            }
            for r in 1..=n {
                for c in 1..=n {
                    if p.is_full(r, c).unwrap() {
                        prop_assert!(p.is_open(r, c).unwrap());
                    }
                }
            }
        }

        #[test]
        fn reopening_changes_nothing((n, open) in sites(6)) {
            let mut once = Percolation::new(n as i64).unwrap();
            let mut twice = Percolation::new(n as i64).unwrap();
            for &(r, c) in &open {
                once.open(r, c).unwrap();
                twice.open(r, c).unwrap();
                twice.open(r, c).unwrap();
            }
            prop_assert_eq!(once.number_of_open_sites(), twice.number_of_open_sites());
            prop_assert_eq!(once.percolates(), twice.percolates());
            for r in 1..=n {
                for c in 1..=n {
                    prop_assert_eq!(once.is_open(r, c).unwrap(), twice.is_open(r, c).unwrap());
                    prop_assert_eq!(once.is_full(r, c).unwrap(), twice.is_full(r, c).unwrap());
                }
            }
        }

        #[test]
        fn percolation_is_monotonic((n, open) in sites(6)) {
            let mut p = Percolation::new(n as i64).unwrap();
            let mut seen = false;
            for &(r, c) in &open {
                p.open(r, c).unwrap();
                let now = p.percolates();
                prop_assert!(!seen || now);
                seen = now;
            }
        }
    }
}
