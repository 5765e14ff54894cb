//! The scouting task: visit a queue of targets along risk-aware routes,
//! evading threats on the way.

use std::collections::VecDeque;

use safepath_core::{Clock, Point};
use safepath_field::HazardMap;
use safepath_paths::{Route, RouteSearch};

use crate::config::ScoutConfig;
use crate::threat::{Threat, Unit, mark_threats};

/// Outcome of one scouting tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Every target has been visited or given up on.
    Done,
    NotDone,
    /// The unit is not standing on a valid cell, so nothing can be planned.
    Fail,
}

/// What the unit should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// Keep executing the previous order.
    Keep,
    MoveTo(Point),
}

/// Counters over the lifetime of a [`Scout`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoutStats {
    pub searches: u32,
    /// Routes dropped because a route point took too long to reach.
    pub replans: u32,
    pub evasions: u32,
    pub targets_visited: u32,
    pub targets_abandoned: u32,
}

/// Route follower for one unit.
#[derive(Debug)]
pub struct Scout {
    targets: VecDeque<Point>,
    target: Option<Point>,
    route: Route,
    route_point: Option<Point>,
    point_timer: f64,
    previous_pos: Option<Point>,
    stuck: u32,
    search: RouteSearch,
    config: ScoutConfig,
    stats: ScoutStats,
}

impl Scout {
    /// A scout that will visit `targets` in order.
    pub fn new(targets: impl IntoIterator<Item = Point>, config: ScoutConfig) -> Self {
        let mut targets: VecDeque<Point> = targets.into_iter().collect();
        let target = targets.pop_front();
        Self {
            targets,
            target,
            route: Route::default(),
            route_point: None,
            point_timer: 0.0,
            previous_pos: None,
            stuck: 0,
            search: RouteSearch::new(config.search),
            config,
            stats: ScoutStats::default(),
        }
    }

    pub fn target(&self) -> Option<Point> {
        self.target
    }

    /// Targets still queued after the current one.
    pub fn pending(&self) -> usize {
        self.targets.len()
    }

    pub fn route_point(&self) -> Option<Point> {
        self.route_point
    }

    /// Route points left after the current one.
    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn stats(&self) -> ScoutStats {
        self.stats
    }

    /// Run one control tick for `unit`.
    pub fn step<C: Clock>(
        &mut self,
        unit: &Unit,
        threats: &[Threat],
        map: &mut HazardMap<C>,
    ) -> (Status, Order) {
        let Some(target) = self.target else {
            return (Status::Done, Order::Keep);
        };
        if !map.is_valid(unit.pos) {
            log::warn!("scout stands on invalid cell {}", unit.pos);
            return (Status::Fail, Order::Keep);
        }

        let r = self.config.arrival_radius;
        if unit.pos.square_distance(target) < r * r {
            log::info!("target {target} reached");
            self.stats.targets_visited += 1;
            return self.switch_target(unit, map);
        }

        if self.previous_pos == Some(unit.pos) {
            self.stuck += 1;
            if self.stuck >= self.config.stuck_ticks {
                log::info!("stuck at {} for {} ticks, giving up on {target}", unit.pos, self.stuck);
                self.stats.targets_abandoned += 1;
                return self.switch_target(unit, map);
            }
            return (Status::NotDone, Order::Keep);
        }

        let nearby = mark_threats(map, unit, threats, &self.config);
        let now = map.clock().now();

        let current = self.route_point;
        let order = match current {
            None => self.plan(unit.pos, target, map),
            Some(_) if now - self.point_timer > self.config.point_search_time => {
                if !nearby.is_empty() {
                    log::info!("pinned down by {} threats, giving up on {target}", nearby.len());
                    self.stats.targets_abandoned += 1;
                    return self.switch_target(unit, map);
                }
                log::debug!("route point not reached in time, replanning from {}", unit.pos);
                self.stats.replans += 1;
                self.plan(unit.pos, target, map)
            }
            Some(point) if !nearby.is_empty() => {
                match map.evasion_point(unit.pos, point, &nearby) {
                    Ok(evade) => {
                        self.stats.evasions += 1;
                        log::debug!("evading {} threats towards {evade}", nearby.len());
                        Self::move_order(map, evade)
                    }
                    Err(err) => {
                        log::warn!("no evasion point: {err}");
                        Self::move_order(map, point)
                    }
                }
            }
            Some(point) => {
                let order = Self::move_order(map, point);
                let reach = f64::from(self.config.point_radius);
                if unit.pos.is_within(point, reach) {
                    if let Some(next) = self.route.next() {
                        self.route_point = Some(next);
                        self.point_timer = now;
                    }
                }
                order
            }
        };

        self.stuck = 0;
        self.previous_pos = Some(unit.pos);
        (Status::NotDone, order)
    }

    fn switch_target<C: Clock>(&mut self, unit: &Unit, map: &mut HazardMap<C>) -> (Status, Order) {
        self.stuck = 0;
        self.route = Route::default();
        self.route_point = None;
        self.target = self.targets.pop_front();
        match self.target {
            None => (Status::Done, Order::Keep),
            Some(next) => {
                log::info!("scouting {next}, {} more queued", self.targets.len());
                (Status::NotDone, self.plan(unit.pos, next, map))
            }
        }
    }

    /// Search a fresh route and order a move to its first point, or straight
    /// at the target when no route came back.
    fn plan<C: Clock>(&mut self, from: Point, target: Point, map: &mut HazardMap<C>) -> Order {
        self.stats.searches += 1;
        self.route = self.search.search(map, from, target).unwrap_or_else(|err| {
            log::warn!("route search {from} -> {target} failed: {err}");
            Route::default()
        });
        self.route_point = self.route.next();
        self.point_timer = map.clock().now();
        Self::move_order(map, self.route_point.unwrap_or(target))
    }

    /// Orders towards cells the map rejects are dropped.
    fn move_order<C: Clock>(map: &HazardMap<C>, p: Point) -> Order {
        if map.is_valid(p) {
            Order::MoveTo(p)
        } else {
            log::trace!("dropping move order to invalid cell {p}");
            Order::Keep
        }
    }
}
