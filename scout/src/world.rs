//! A small deterministic simulation driving a [`Scout`] across a scenario.

use std::collections::VecDeque;
use std::fmt;

use rand::rngs::SmallRng;
use rand::{RngExt, SeedableRng};
use safepath_core::{Clock, Grid, ManualClock, Point};
use safepath_field::{FieldError, HazardMap, Terrain, TerrainGrid};

use crate::config::ScoutConfig;
use crate::maps::Scenario;
use crate::task::{Order, Scout, ScoutStats, Status};
use crate::threat::{Threat, Unit};

pub const UNIT_SIGHT_RANGE: f64 = 8.0;
pub const THREAT_ATTACK_RANGE: f64 = 3.0;
pub const THREAT_SIGHT_RANGE: f64 = 6.0;

/// Potential above which a cell counts as hot in the run summary.
const HOT_THRESHOLD: f64 = 10.0;

/// Result of [`World::run`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub ticks: u64,
    pub status: Status,
    pub position: Point,
    pub seconds: f64,
    pub stats: ScoutStats,
    /// Cells holding a potential above the hot threshold at the end.
    pub hot_cells: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} after {} ticks ({:.1}s) at {}: visited {}, abandoned {}, \
             {} searches, {} replans, {} evasions, {} hot cells",
            self.status,
            self.ticks,
            self.seconds,
            self.position,
            self.stats.targets_visited,
            self.stats.targets_abandoned,
            self.stats.searches,
            self.stats.replans,
            self.stats.evasions,
            self.hot_cells
        )
    }
}

/// Terrain, hazard map, one scouting unit and wandering threats.
///
/// Each tick the scout decides, the unit takes one step towards its ordered
/// destination, every threat takes one random step and the clock advances
/// by the configured tick length.
#[derive(Debug)]
pub struct World {
    terrain: TerrainGrid,
    map: HazardMap<ManualClock>,
    clock: ManualClock,
    unit: Unit,
    destination: Option<Point>,
    threats: Vec<Threat>,
    rng: SmallRng,
    tick: u64,
    tick_seconds: f64,
}

impl World {
    pub fn new(scenario: &Scenario, config: &ScoutConfig, seed: u64) -> Result<Self, FieldError> {
        let clock = ManualClock::new(0.0);
        let map = HazardMap::with_config(&scenario.terrain, clock.clone(), config.field)?;
        if !map.is_valid(scenario.start) {
            return Err(FieldError::InvalidPosition(scenario.start));
        }
        let threats = scenario
            .threats
            .iter()
            .map(|&pos| Threat {
                pos,
                attack_range: THREAT_ATTACK_RANGE,
                sight_range: THREAT_SIGHT_RANGE,
            })
            .collect();
        Ok(Self {
            terrain: scenario.terrain.clone(),
            map,
            clock,
            unit: Unit {
                pos: scenario.start,
                sight_range: UNIT_SIGHT_RANGE,
            },
            destination: None,
            threats,
            rng: SmallRng::seed_from_u64(seed),
            tick: 0,
            tick_seconds: config.tick_seconds,
        })
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    pub fn threats(&self) -> &[Threat] {
        &self.threats
    }

    pub fn map(&self) -> &HazardMap<ManualClock> {
        &self.map
    }

    pub fn destination(&self) -> Option<Point> {
        self.destination
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Advance the simulation by one tick.
    pub fn tick(&mut self, scout: &mut Scout) -> Status {
        let (status, order) = scout.step(&self.unit, &self.threats, &mut self.map);
        if let Order::MoveTo(p) = order {
            self.destination = Some(p);
        }
        self.move_unit();
        self.move_threats();
        self.clock.advance(self.tick_seconds);
        self.tick += 1;
        status
    }

    /// Tick until the scout is done, fails, or `max_ticks` have passed.
    pub fn run(&mut self, scout: &mut Scout, max_ticks: u64) -> Summary {
        let mut status = Status::NotDone;
        while status == Status::NotDone && self.tick < max_ticks {
            status = self.tick(scout);
            if self.tick % 100 == 0 {
                log::debug!(
                    "tick {}: unit at {}, target {:?}",
                    self.tick,
                    self.unit.pos,
                    scout.target()
                );
            }
        }
        Summary {
            ticks: self.tick,
            status,
            position: self.unit.pos,
            seconds: self.clock.now(),
            stats: scout.stats(),
            hot_cells: self.map.cells_above(HOT_THRESHOLD).count(),
        }
    }

    fn move_unit(&mut self) {
        let Some(dest) = self.destination else {
            return;
        };
        if dest == self.unit.pos {
            self.destination = None;
            return;
        }
        match first_step(&self.terrain, self.unit.pos, dest) {
            Some(next) => self.unit.pos = next,
            None => log::trace!("no way from {} to {dest}", self.unit.pos),
        }
    }

    fn move_threats(&mut self) {
        for i in 0..self.threats.len() {
            let d = Point::new(self.rng.random_range(-1..=1), self.rng.random_range(-1..=1));
            let next = self.threats[i].pos + d;
            if next != self.unit.pos && self.terrain.is_walkable(next) {
                self.threats[i].pos = next;
            }
        }
    }
}

/// First move of a shortest 8-connected walk over walkable cells.
fn first_step(terrain: &TerrainGrid, from: Point, to: Point) -> Option<Point> {
    if !terrain.is_walkable(to) {
        return None;
    }
    let mut parent: Grid<Option<Point>> = Grid::new(terrain.width(), terrain.height(), None);
    let mut queue = VecDeque::from([from]);
    parent.set(from, Some(from));
    while let Some(p) = queue.pop_front() {
        if p == to {
            break;
        }
        for n in p.ring(1) {
            if terrain.is_walkable(n) && parent.at(n) == Some(&None) {
                parent.set(n, Some(p));
                queue.push_back(n);
            }
        }
    }
    let mut step = to;
    loop {
        let prev = (*parent.at(step)?)?;
        if prev == from {
            return Some(step);
        }
        step = prev;
    }
}
