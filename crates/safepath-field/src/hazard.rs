//! The hazard map: per-cell potential, passability and update time.
//!
//! Potentials age out. A read of a cell whose last update is older than the
//! decay window resets the cell to [`BASELINE_POTENTIAL`] and stamps the
//! current time, so reads are `&mut self`.

use std::time::Instant;

use safepath_core::{Clock, Grid, Point, Range, SystemClock};
use safepath_paths::RiskField;

use crate::config::{BASELINE_POTENTIAL, FieldConfig, NEVER_DECAYS};
use crate::error::FieldError;
use crate::terrain::Terrain;

/// Update stamp of cells that were never stamped.
const EPOCH: f64 = 0.0;

/// State of one hazard map cell.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HazardCell {
    pub potential: f64,
    pub passable: bool,
    /// Clock time of the last stamped write.
    pub last_update: f64,
}

impl Default for HazardCell {
    fn default() -> Self {
        Self {
            potential: BASELINE_POTENTIAL,
            passable: true,
            last_update: EPOCH,
        }
    }
}

/// Which extreme [`HazardMap::optimal_potential`] looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Optimum {
    Highest,
    Lowest,
}

/// Time-decaying potential field over a terrain.
///
/// Created once per terrain. Threat detection keeps writing area potentials
/// into it while route searches read it through [`RiskField`]. All access
/// goes through `&mut self`, so sharing between threads requires the caller
/// to wrap the map in a lock.
#[derive(Debug, Clone)]
pub struct HazardMap<C = SystemClock> {
    cells: Grid<HazardCell>,
    clock: C,
    config: FieldConfig,
}

impl<C: Clock> HazardMap<C> {
    /// Build a map over `terrain` with the default [`FieldConfig`].
    pub fn new(terrain: &impl Terrain, clock: C) -> Self {
        Self::build(terrain, clock, FieldConfig::default())
    }

    /// Build a map with custom tuning.
    pub fn with_config(
        terrain: &impl Terrain,
        clock: C,
        config: FieldConfig,
    ) -> Result<Self, FieldError> {
        if config.obstacle_radius <= 0 {
            return Err(FieldError::NonPositiveRadius(config.obstacle_radius));
        }
        Ok(Self::build(terrain, clock, config))
    }

    fn build(terrain: &impl Terrain, clock: C, config: FieldConfig) -> Self {
        let mut map = Self {
            cells: Grid::new(terrain.width(), terrain.height(), HazardCell::default()),
            clock,
            config,
        };
        map.initialize_obstacles(terrain);
        map
    }

    /// Mark every non-walkable cell impassable and stamp the obstacle
    /// penalty over the valid cells around it. Runs once, at construction.
    fn initialize_obstacles(&mut self, terrain: &impl Terrain) {
        let started = Instant::now();
        let stamp = self.config.pin_static_penalties.then_some(NEVER_DECAYS);
        let mut obstacles = 0usize;
        for p in self.cells.bounds() {
            if !terrain.is_valid_position(p) || terrain.is_walkable(p) {
                continue;
            }
            if let Some(cell) = self.cells.at_mut(p) {
                cell.passable = false;
            }
            self.stamp_area(
                p,
                self.config.obstacle_radius,
                self.config.obstacle_potential,
                stamp,
            );
            obstacles += 1;
        }
        log::debug!(
            "hazard map {}x{}: {} obstacle cells stamped with {} in {:?}",
            self.width(),
            self.height(),
            obstacles,
            self.config.obstacle_potential,
            started.elapsed()
        );
    }

    pub fn width(&self) -> i32 {
        self.cells.width()
    }

    pub fn height(&self) -> i32 {
        self.cells.height()
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Whether `p` is in bounds and passable.
    pub fn is_valid(&self, p: Point) -> bool {
        self.cells.at(p).is_some_and(|c| c.passable)
    }

    fn valid_cell(&self, p: Point) -> Result<&HazardCell, FieldError> {
        match self.cells.at(p) {
            Some(cell) if cell.passable => Ok(cell),
            _ => Err(FieldError::InvalidPosition(p)),
        }
    }

    fn valid_cell_mut(&mut self, p: Point) -> Result<&mut HazardCell, FieldError> {
        match self.cells.at_mut(p) {
            Some(cell) if cell.passable => Ok(cell),
            _ => Err(FieldError::InvalidPosition(p)),
        }
    }

    fn check_valid(&self, p: Point) -> Result<(), FieldError> {
        self.valid_cell(p).map(|_| ())
    }

    // -----------------------------------------------------------------------
    // Single cells
    // -----------------------------------------------------------------------

    /// Write a potential without touching the update time.
    pub fn set_potential(&mut self, p: Point, value: f64) -> Result<(), FieldError> {
        self.valid_cell_mut(p)?.potential = value;
        Ok(())
    }

    /// Read a potential, applying the decay rule first.
    pub fn potential(&mut self, p: Point) -> Result<f64, FieldError> {
        let now = self.clock.now();
        let window = self.config.decay_window;
        let cell = self.valid_cell_mut(p)?;
        if now - cell.last_update > window {
            cell.potential = BASELINE_POTENTIAL;
            cell.last_update = now;
        }
        Ok(cell.potential)
    }

    /// Passability of an in-bounds cell.
    pub fn passable(&self, p: Point) -> Result<bool, FieldError> {
        self.cells
            .at(p)
            .map(|c| c.passable)
            .ok_or(FieldError::OutOfBounds(p))
    }

    /// Open or close an in-bounds cell.
    pub fn set_passable(&mut self, p: Point, passable: bool) -> Result<(), FieldError> {
        let cell = self.cells.at_mut(p).ok_or(FieldError::OutOfBounds(p))?;
        cell.passable = passable;
        Ok(())
    }

    pub fn update_time(&self, p: Point) -> Result<f64, FieldError> {
        Ok(self.valid_cell(p)?.last_update)
    }

    /// Stamp the update time of a cell. `t` must be non-negative.
    pub fn set_update_time(&mut self, p: Point, t: f64) -> Result<(), FieldError> {
        if !(t >= 0.0) {
            return Err(FieldError::NegativeTime(t));
        }
        self.valid_cell_mut(p)?.last_update = t;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Neighbourhoods
    // -----------------------------------------------------------------------

    /// The in-bounds part of the square of half-size `radius` around `center`.
    fn area(&self, center: Point, radius: i32) -> Result<Range, FieldError> {
        if radius <= 0 {
            return Err(FieldError::NonPositiveRadius(radius));
        }
        Ok(Range::around(center, radius).intersect(self.cells.bounds()))
    }

    /// Position of the strictly highest or lowest potential among the valid
    /// cells around `center`. Scans column by column (x outer, y inner) and
    /// keeps the first of equal values.
    pub fn optimal_potential(
        &mut self,
        center: Point,
        radius: i32,
        seek: Optimum,
    ) -> Result<Point, FieldError> {
        self.check_valid(center)?;
        let area = self.area(center, radius)?;
        let mut best = center;
        let mut best_value = match seek {
            Optimum::Highest => f64::NEG_INFINITY,
            Optimum::Lowest => f64::INFINITY,
        };
        for x in area.min.x..area.max.x {
            for y in area.min.y..area.max.y {
                let p = Point::new(x, y);
                if !self.is_valid(p) {
                    continue;
                }
                let v = self.potential(p)?;
                let better = match seek {
                    Optimum::Highest => v > best_value,
                    Optimum::Lowest => v < best_value,
                };
                if better {
                    best = p;
                    best_value = v;
                }
            }
        }
        Ok(best)
    }

    /// Sum of the (decayed) potentials of the valid cells around `center`.
    pub fn area_potential(&mut self, center: Point, radius: i32) -> Result<f64, FieldError> {
        self.check_valid(center)?;
        let area = self.area(center, radius)?;
        let mut total = 0.0;
        for p in area {
            if self.is_valid(p) {
                total += self.potential(p)?;
            }
        }
        Ok(total)
    }

    /// Write `value` to every valid cell around `center`.
    ///
    /// With `stamp_time` the cells also get the current time, so the mark
    /// expires after the decay window. Without it the previous stamps stay.
    pub fn set_area_potential(
        &mut self,
        center: Point,
        radius: i32,
        value: f64,
        stamp_time: bool,
    ) -> Result<(), FieldError> {
        self.check_valid(center)?;
        if radius <= 0 {
            return Err(FieldError::NonPositiveRadius(radius));
        }
        let stamp = stamp_time.then(|| self.clock.now());
        self.stamp_area(center, radius, value, stamp);
        log::trace!("area potential {value} around {center} (r={radius}, stamp={stamp:?})");
        Ok(())
    }

    /// Area write without centre validation. Callers check `radius > 0`.
    fn stamp_area(&mut self, center: Point, radius: i32, value: f64, stamp: Option<f64>) {
        let area = Range::around(center, radius).intersect(self.cells.bounds());
        for p in area {
            if let Some(cell) = self.cells.at_mut(p).filter(|c| c.passable) {
                cell.potential = value;
                if let Some(t) = stamp {
                    cell.last_update = t;
                }
            }
        }
    }

    /// Valid cells whose stored potential exceeds `threshold`.
    ///
    /// Reads raw values: no decay is applied, so the snapshot may include
    /// marks the next read would reset.
    pub fn cells_above(&self, threshold: f64) -> impl Iterator<Item = (Point, f64)> + '_ {
        self.cells
            .iter()
            .filter(move |(_, c)| c.passable && c.potential > threshold)
            .map(|(p, c)| (p, c.potential))
    }
}

impl<C: Clock> RiskField for HazardMap<C> {
    fn is_valid(&self, p: Point) -> bool {
        HazardMap::is_valid(self, p)
    }

    fn risk(&mut self, p: Point) -> f64 {
        self.potential(p).unwrap_or(f64::INFINITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OBSTACLE_POTENTIAL;
    use crate::terrain::TerrainGrid;
    use safepath_core::ManualClock;

    fn open_map(w: i32, h: i32) -> (HazardMap<ManualClock>, ManualClock) {
        let clock = ManualClock::new(100.0);
        (HazardMap::new(&TerrainGrid::open(w, h), clock.clone()), clock)
    }

    #[test]
    fn unwritten_cells_read_baseline() {
        let (mut map, _) = open_map(8, 8);
        for p in Range::new(0, 0, 8, 8) {
            assert_eq!(map.potential(p).unwrap(), 1.0);
        }
    }

    #[test]
    fn out_of_bounds_is_a_contract_violation() {
        let (mut map, _) = open_map(4, 4);
        let p = Point::new(4, 0);
        assert_eq!(map.potential(p), Err(FieldError::InvalidPosition(p)));
        assert_eq!(map.set_potential(p, 3.0), Err(FieldError::InvalidPosition(p)));
        assert_eq!(map.passable(p), Err(FieldError::OutOfBounds(p)));
        assert_eq!(map.set_passable(p, true), Err(FieldError::OutOfBounds(p)));
        assert!(!map.is_valid(Point::new(-1, 2)));
    }

    #[test]
    fn negative_time_is_rejected() {
        let (mut map, _) = open_map(4, 4);
        let p = Point::new(1, 1);
        assert_eq!(map.set_update_time(p, -1.0), Err(FieldError::NegativeTime(-1.0)));
        assert!(map.set_update_time(p, f64::NAN).is_err());
        map.set_update_time(p, 12.5).unwrap();
        assert_eq!(map.update_time(p).unwrap(), 12.5);
    }

    #[test]
    fn set_potential_leaves_the_stamp() {
        let (mut map, clock) = open_map(4, 4);
        let p = Point::new(2, 2);
        map.set_update_time(p, clock.now()).unwrap();
        map.set_potential(p, 7.0).unwrap();
        assert_eq!(map.update_time(p).unwrap(), 100.0);
        assert_eq!(map.potential(p).unwrap(), 7.0);
    }

    #[test]
    fn potential_decays_on_read_after_window() {
        let (mut map, clock) = open_map(6, 6);
        let c = Point::new(3, 3);
        map.set_area_potential(c, 1, 150.0, true).unwrap();
        clock.advance(40.0);
        // Exactly at the window the mark still holds.
        assert_eq!(map.potential(c).unwrap(), 150.0);
        clock.advance(0.5);
        assert_eq!(map.potential(c).unwrap(), 1.0);
        assert_eq!(map.update_time(c).unwrap(), 140.5);
        // Neighbours are untouched until read.
        assert_eq!(map.cells_above(100.0).count(), 8);
    }

    #[test]
    fn area_write_covers_exactly_the_square() {
        let (mut map, _) = open_map(10, 10);
        let c = Point::new(4, 4);
        map.set_area_potential(c, 2, 50.0, true).unwrap();
        for p in Range::new(0, 0, 10, 10) {
            let expected = if Range::around(c, 2).contains(p) { 50.0 } else { 1.0 };
            assert_eq!(map.potential(p).unwrap(), expected, "at {p}");
        }
        assert_eq!(map.area_potential(c, 2).unwrap(), 25.0 * 50.0);
    }

    #[test]
    fn area_operations_clip_to_bounds_and_skip_blocked() {
        let clock = ManualClock::new(0.0);
        let terrain = TerrainGrid::parse("...\n.#.\n...").unwrap();
        let mut map = HazardMap::new(&terrain, clock);
        // 8 valid cells, every one next to the obstacle.
        let corner = Point::new(0, 0);
        assert_eq!(map.area_potential(corner, 1).unwrap(), 3.0 * OBSTACLE_POTENTIAL);
        map.set_area_potential(corner, 5, 3.0, true).unwrap();
        assert_eq!(map.cells_above(2.0).count(), 8);
        assert_eq!(
            map.set_area_potential(corner, 0, 3.0, true),
            Err(FieldError::NonPositiveRadius(0))
        );
        assert_eq!(
            map.area_potential(Point::new(1, 1), 1),
            Err(FieldError::InvalidPosition(Point::new(1, 1)))
        );
    }

    #[test]
    fn optimal_potential_finds_extremes() {
        let (mut map, _) = open_map(9, 9);
        let c = Point::new(4, 4);
        map.set_area_potential(c, 2, 10.0, true).unwrap();
        map.set_potential(Point::new(5, 3), 30.0).unwrap();
        map.set_potential(Point::new(3, 5), 0.5).unwrap();
        assert_eq!(map.optimal_potential(c, 2, Optimum::Highest).unwrap(), Point::new(5, 3));
        assert_eq!(map.optimal_potential(c, 2, Optimum::Lowest).unwrap(), Point::new(3, 5));
    }

    #[test]
    fn optimal_potential_keeps_first_of_ties() {
        let (mut map, _) = open_map(5, 5);
        let c = Point::new(2, 2);
        assert_eq!(map.optimal_potential(c, 1, Optimum::Highest).unwrap(), Point::new(1, 1));
        assert_eq!(map.optimal_potential(c, 1, Optimum::Lowest).unwrap(), Point::new(1, 1));
    }

    #[test]
    fn optimal_potential_scans_columns_first() {
        let (mut map, _) = open_map(5, 5);
        let c = Point::new(2, 2);
        map.set_area_potential(c, 1, 1.0, true).unwrap();
        map.set_potential(Point::new(3, 1), 9.0).unwrap();
        map.set_potential(Point::new(1, 3), 9.0).unwrap();
        assert_eq!(map.optimal_potential(c, 1, Optimum::Highest).unwrap(), Point::new(1, 3));
        map.set_potential(Point::new(3, 1), 0.5).unwrap();
        map.set_potential(Point::new(1, 3), 0.5).unwrap();
        assert_eq!(map.optimal_potential(c, 1, Optimum::Lowest).unwrap(), Point::new(1, 3));
    }

    #[test]
    fn update_time_rejects_invalid_cells() {
        let terrain = TerrainGrid::parse("..\n.#").unwrap();
        let mut map = HazardMap::new(&terrain, ManualClock::new(5.0));
        map.set_update_time(Point::new(0, 1), 3.0).unwrap();
        assert_eq!(map.update_time(Point::new(0, 1)).unwrap(), 3.0);
        assert_eq!(
            map.update_time(Point::new(1, 1)),
            Err(FieldError::InvalidPosition(Point::new(1, 1)))
        );
        assert_eq!(
            map.update_time(Point::new(-1, 0)),
            Err(FieldError::InvalidPosition(Point::new(-1, 0)))
        );
    }

    #[test]
    fn optimal_potential_bounds_hold() {
        let (mut map, _) = open_map(7, 7);
        let c = Point::new(3, 3);
        map.set_area_potential(c, 2, 1.0, true).unwrap();
        for (i, p) in Range::around(c, 2).iter().enumerate() {
            map.set_potential(p, (i * 7 % 11) as f64).unwrap();
        }
        let hi = map.optimal_potential(c, 2, Optimum::Highest).unwrap();
        let lo = map.optimal_potential(c, 2, Optimum::Lowest).unwrap();
        let hi_v = map.potential(hi).unwrap();
        let lo_v = map.potential(lo).unwrap();
        for p in Range::around(c, 2) {
            let v = map.potential(p).unwrap();
            assert!(lo_v <= v && v <= hi_v);
        }
    }

    #[test]
    fn reopening_a_cell_makes_it_valid() {
        let terrain = TerrainGrid::parse("..\n.#").unwrap();
        let mut map = HazardMap::new(&terrain, ManualClock::new(0.0));
        let p = Point::new(1, 1);
        assert_eq!(map.passable(p), Ok(false));
        assert!(map.potential(p).is_err());
        map.set_passable(p, true).unwrap();
        assert_eq!(map.potential(p).unwrap(), 1.0);
    }

    #[test]
    fn with_config_rejects_zero_obstacle_radius() {
        let config = FieldConfig {
            obstacle_radius: 0,
            ..FieldConfig::default()
        };
        let err = HazardMap::with_config(&TerrainGrid::open(2, 2), ManualClock::new(0.0), config)
            .unwrap_err();
        assert_eq!(err, FieldError::NonPositiveRadius(0));
    }

    #[test]
    fn risk_field_view() {
        let terrain = TerrainGrid::parse("...\n.#.").unwrap();
        let mut map = HazardMap::new(&terrain, ManualClock::new(1.0));
        assert!(RiskField::is_valid(&map, Point::new(0, 0)));
        assert!(!RiskField::is_valid(&map, Point::new(1, 1)));
        assert_eq!(map.risk(Point::new(1, 1)), f64::INFINITY);
        assert_eq!(map.risk(Point::new(0, 0)), OBSTACLE_POTENTIAL);
    }
}
