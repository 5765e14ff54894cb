use safepath_core::Point;

/// Cached coarse neighbor computation.
///
/// Candidates are the eight cells of the 3×3 pattern scaled by a step, so a
/// search expands `step` cells at a time instead of one.
#[derive(Debug)]
pub struct CoarseNeighbors {
    buf: Vec<Point>,
}

impl Default for CoarseNeighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl CoarseNeighbors {
    /// Create a new `CoarseNeighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(8),
        }
    }

    /// Return the neighbors of `p` at distance `step` along each axis,
    /// keeping only those for which `keep` returns `true`. The center is
    /// never returned.
    pub fn ring(&mut self, p: Point, step: i32, keep: impl Fn(Point) -> bool) -> &[Point] {
        self.fill_ring(p, step, &keep);
        &self.buf
    }

    fn fill_ring(&mut self, p: Point, step: i32, keep: &impl Fn(Point) -> bool) {
        self.buf.clear();
        for n in p.ring(step) {
            if n != p && keep(n) {
                self.buf.push(n);
            }
        }
    }

    /// Like [`ring`](Self::ring), but also offers `goal` when it lies inside
    /// the step square around `p` and passes `keep`.
    pub fn ring_towards(
        &mut self,
        p: Point,
        step: i32,
        goal: Point,
        keep: impl Fn(Point) -> bool,
    ) -> &[Point] {
        self.fill_ring(p, step, &keep);
        let d = goal - p;
        if goal != p
            && d.x.abs() <= step
            && d.y.abs() <= step
            && !self.buf.contains(&goal)
            && keep(goal)
        {
            self.buf.push(goal);
        }
        &self.buf
    }
}
