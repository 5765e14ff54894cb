//! Local evasion: bias the next waypoint away from nearby threats without
//! replanning.

use safepath_core::{Clock, Point};

use crate::config::K_REP;
use crate::error::FieldError;
use crate::hazard::HazardMap;

/// `K_REP · (from − toward)`: a vector pointing from `toward` to `from`.
///
/// Zero when both points coincide.
#[inline]
pub fn repulsion(from: Point, toward: Point) -> Point {
    (from - toward) * K_REP
}

impl<C: Clock> HazardMap<C> {
    /// [`repulsion`] between two valid cells.
    pub fn repulsion_force(&self, from: Point, toward: Point) -> Result<Point, FieldError> {
        for p in [from, toward] {
            if !self.is_valid(p) {
                return Err(FieldError::InvalidPosition(p));
            }
        }
        Ok(repulsion(from, toward))
    }

    /// `next` shifted by the superposed repulsion of every threat on
    /// `current`.
    ///
    /// The result is not checked against the map: it may be out of bounds or
    /// blocked, and callers decide what to do with such a target.
    pub fn evasion_point(
        &self,
        current: Point,
        next: Point,
        threats: &[Point],
    ) -> Result<Point, FieldError> {
        for p in [current, next] {
            if !self.is_valid(p) {
                return Err(FieldError::InvalidPosition(p));
            }
        }
        let force = threats
            .iter()
            .map(|&t| self.repulsion_force(current, t))
            .sum::<Result<Point, _>>()?;
        log::trace!("evasion from {current}: {next} + {force}");
        Ok(next + force)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::TerrainGrid;
    use safepath_core::ManualClock;

    fn map() -> HazardMap<ManualClock> {
        let terrain = TerrainGrid::parse(
            "
..........
..........
..........
.....#....
..........
",
        )
        .unwrap();
        HazardMap::new(&terrain, ManualClock::new(0.0))
    }

    #[test]
    fn repulsion_points_away_from_target() {
        assert_eq!(repulsion(Point::new(3, 3), Point::new(3, 3)), Point::ZERO);
        assert_eq!(repulsion(Point::new(4, 2), Point::new(1, 1)), Point::new(3, 1));
        assert_eq!(repulsion(Point::new(1, 1), Point::new(4, 2)), Point::new(-3, -1));
    }

    #[test]
    fn repulsion_force_requires_valid_cells() {
        let map = map();
        assert_eq!(
            map.repulsion_force(Point::new(2, 2), Point::new(5, 3)),
            Err(FieldError::InvalidPosition(Point::new(5, 3)))
        );
        assert_eq!(
            map.repulsion_force(Point::new(2, 2), Point::new(2, 2)),
            Ok(Point::ZERO)
        );
    }

    #[test]
    fn evasion_superposes_threats() {
        let map = map();
        let current = Point::new(4, 2);
        let next = Point::new(6, 2);
        // One threat to the left, one above.
        let threats = [Point::new(2, 2), Point::new(4, 0)];
        assert_eq!(
            map.evasion_point(current, next, &threats),
            Ok(Point::new(8, 4))
        );
    }

    #[test]
    fn evasion_without_threats_keeps_next() {
        let map = map();
        assert_eq!(
            map.evasion_point(Point::new(1, 1), Point::new(2, 1), &[]),
            Ok(Point::new(2, 1))
        );
    }

    #[test]
    fn opposite_threats_cancel() {
        let map = map();
        let threats = [Point::new(0, 1), Point::new(4, 1)];
        assert_eq!(
            map.evasion_point(Point::new(2, 1), Point::new(3, 1), &threats),
            Ok(Point::new(3, 1))
        );
    }

    #[test]
    fn evasion_result_may_leave_the_map() {
        let map = map();
        let p = map
            .evasion_point(Point::new(1, 1), Point::new(0, 1), &[Point::new(3, 1)])
            .unwrap();
        assert_eq!(p, Point::new(-2, 1));
        assert!(!map.is_valid(p));
    }
}
