//! Dense row-major storage for per-cell map data.
//!
//! [`Grid`] owns one value of `T` per cell of a `width × height` map whose
//! origin is `(0, 0)`. Out-of-bounds accesses return `None` instead of
//! panicking so that callers decide how to report them.

use crate::geom::{Point, Range};

/// A 2D grid of `T` values covering `[0, width) × [0, height)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid<T> {
    cells: Vec<T>,
    bounds: Range,
}

impl<T: Clone> Grid<T> {
    /// Create a new grid with every cell set to `value`.
    ///
    /// Negative dimensions produce an empty grid.
    pub fn new(width: i32, height: i32, value: T) -> Self {
        let bounds = Range::new(0, 0, width.max(0), height.max(0));
        Self {
            cells: vec![value; bounds.len()],
            bounds,
        }
    }

    /// Fill the entire grid with the given value.
    pub fn fill(&mut self, value: T) {
        for c in self.cells.iter_mut() {
            *c = value.clone();
        }
    }
}

impl<T> Grid<T> {
    /// Build a grid by evaluating `f` at every point in row-major order.
    pub fn from_fn(width: i32, height: i32, mut f: impl FnMut(Point) -> T) -> Self {
        let bounds = Range::new(0, 0, width.max(0), height.max(0));
        let cells = bounds.iter().map(&mut f).collect();
        Self { cells, bounds }
    }

    /// Returns the bounding range of this grid.
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Width of the grid.
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Height of the grid.
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Flat index of `p`, or `None` if out of bounds.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some((p.y * self.bounds.width() + p.x) as usize)
    }

    /// Get a reference to the cell at a point, or `None` if out of bounds.
    pub fn at(&self, p: Point) -> Option<&T> {
        self.index(p).map(|i| &self.cells[i])
    }

    /// Get a mutable reference to the cell at a point.
    pub fn at_mut(&mut self, p: Point) -> Option<&mut T> {
        self.index(p).map(move |i| &mut self.cells[i])
    }

    /// Set the cell at a point. Returns `false` if out of bounds.
    pub fn set(&mut self, p: Point, value: T) -> bool {
        match self.at_mut(p) {
            Some(c) => {
                *c = value;
                true
            }
            None => false,
        }
    }

    /// Iterate over `(Point, &T)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &T)> {
        self.bounds.iter().zip(self.cells.iter())
    }

    /// Count how many cells satisfy a predicate.
    pub fn count_fn(&self, mut f: impl FnMut(Point, &T) -> bool) -> usize {
        self.iter().filter(|&(p, c)| f(p, c)).count()
    }
}
