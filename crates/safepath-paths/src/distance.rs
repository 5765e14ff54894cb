use safepath_core::Point;

/// Euclidean (L2) distance between two points.
#[inline]
pub fn euclidean(a: Point, b: Point) -> f64 {
    a.distance(b)
}

/// Euclidean distance to `goal` stretched by the risk `potential` at `from`.
///
/// With a baseline potential of `1.0` this is the plain distance; hazardous
/// cells look proportionally farther away. Overestimates on purpose, so a
/// search guided by it is not admissible.
#[inline]
pub fn risk_estimate(potential: f64, from: Point, goal: Point) -> f64 {
    potential * euclidean(from, goal)
}
