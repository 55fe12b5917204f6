/// Row-major flat grid. No per-cell objects.
/// Bounded on all four sides: nothing wraps.
#[derive(Clone, Debug)]
pub struct Grid<T> {
    pub data: Vec<T>,
    pub w: usize,
    pub h: usize,
}

impl<T: Copy + Default> Grid<T> {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            data: vec![T::default(); w * h],
            w,
            h,
        }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.w && y < self.h);
        y * self.w + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.data[self.idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: T) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }
}

/// Offset (x, y) by (dx, dy). Returns None if the result leaves the grid.
#[inline]
pub fn offset_xy(x: usize, y: usize, dx: i32, dy: i32, w: usize, h: usize) -> Option<(usize, usize)> {
    let nx = x.checked_add_signed(dx as isize)?;
    let ny = y.checked_add_signed(dy as isize)?;
    (nx < w && ny < h).then_some((nx, ny))
}

/// 4-connected neighbors (up, down, left, right), clipped at the walls.
pub fn neighbors4(x: usize, y: usize, w: usize, h: usize) -> impl Iterator<Item = (usize, usize)> {
    let offsets: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];
    let mut out = [(0usize, 0usize); 4];
    let mut n = 0;
    for (dx, dy) in offsets {
        if let Some(pos) = offset_xy(x, y, dx, dy, w, h) {
            out[n] = pos;
            n += 1;
        }
    }
    out.into_iter().take(n)
}
