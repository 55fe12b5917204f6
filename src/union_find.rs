//! Disjoint-set forest over elements `0..n`.
//!
//! # Algorithm
//!
//! Weighted quick-union with full path compression. Each element stores a
//! parent index (a self-loop marks a root) and each root stores the number
//! of elements in its tree. `union` hangs the lighter root under the heavier
//! one, which bounds tree height by `log2(n)`; `find` then points every node
//! it walks through straight at the root. Together the amortized cost per
//! operation is O(α(n)).
//!
//! The forest is two flat `Vec<usize>`s. Indices stand in for references,
//! so there are no pointers to chase and nothing to free.

/// Weighted quick-union with path compression.
///
/// # Examples
/// ```
/// use percolation::union_find::UnionFind;
///
/// let mut uf = UnionFind::new(4);
/// uf.union(0, 1);
/// uf.union(2, 3);
/// assert!(uf.connected(0, 1));
/// assert!(!uf.connected(1, 2));
/// assert_eq!(uf.count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
    count: usize,
}

impl UnionFind {
    /// Creates `n` singleton sets `{0}, {1}, ..., {n-1}`.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
            count: n,
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Number of disjoint sets.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Representative of the set containing `x`.
    ///
    /// Full path compression: every node visited on the way up is re-parented
    /// directly onto the root.
    ///
    /// # Panics
    /// Panics if `x >= len()`.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut node = x;
        while node != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    /// Merges the sets containing `x` and `y`.
    ///
    /// Returns `true` if a merge happened, `false` if they already shared a set.
    ///
    /// # Panics
    /// Panics if `x >= len()` or `y >= len()`.
    pub fn union(&mut self, x: usize, y: usize) -> bool {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x == root_y {
            return false;
        }

        // Smaller tree goes under the larger; ties hang y under x.
        let (small, large) = if self.size[root_x] < self.size[root_y] {
            (root_x, root_y)
        } else {
            (root_y, root_x)
        };
        self.parent[small] = large;
        self.size[large] += self.size[small];
        self.count -= 1;
        true
    }

    pub fn connected(&mut self, x: usize, y: usize) -> bool {
        self.find(x) == self.find(y)
    }

    /// Number of elements in the set containing `x`.
    pub fn component_size(&mut self, x: usize) -> usize {
        let root = self.find(x);
        self.size[root]
    }
}
