use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use safepath_core::Point;

use crate::config::{Requeue, SearchConfig};
use crate::distance::{euclidean, risk_estimate};
use crate::error::SearchError;
use crate::neighbors::CoarseNeighbors;
use crate::route::Route;
use crate::traits::RiskField;
use crate::waypoint::{QueueEntry, Registry, WaypointId};

/// Counters describing the last search run by a [`RouteSearch`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Waypoints popped from the open set and expanded.
    pub expanded: usize,
    /// Waypoints created in the registry.
    pub created: usize,
    /// Wall time spent inside the search.
    pub elapsed: Duration,
}

/// Risk-aware best-first route planner.
///
/// The priority of a waypoint is `g + potential(p) · distance(p, goal)`: the
/// distance heuristic is stretched by the hazard potential, so dangerous
/// regions look farther away than they are. This trades shortest-path
/// optimality for risk avoidance; routes are safe-ish, not shortest.
///
/// Expansion is coarse: neighbors lie `closeness_radius` cells away in each
/// of the eight directions, and any waypoint within `closeness_radius` of the
/// goal ends the search. The goal itself is offered as an extra neighbor once
/// it falls inside the current step square, so goals off the coarse lattice
/// (e.g. next to a map edge) stay reachable.
///
/// `RouteSearch` owns its arena, open set and scratch buffers so repeated
/// searches reuse their allocations. All per-search state is reset at the
/// start of every call.
#[derive(Debug)]
pub struct RouteSearch {
    config: SearchConfig,
    registry: Registry,
    open: BinaryHeap<QueueEntry>,
    seq: u64,
    neighbors: CoarseNeighbors,
    stats: SearchStats,
}

impl Default for RouteSearch {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl RouteSearch {
    /// Create a planner with the given tuning.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            registry: Registry::default(),
            open: BinaryHeap::new(),
            seq: 0,
            neighbors: CoarseNeighbors::new(),
            stats: SearchStats::default(),
        }
    }

    /// The tuning in use.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Statistics of the most recent [`search`](Self::search).
    pub fn last_stats(&self) -> SearchStats {
        self.stats
    }

    /// Plan a route from `start` towards `goal` over `field`.
    ///
    /// Returns an empty route when `start` is already within the closeness
    /// radius of `goal`, or when the reachable area is exhausted without
    /// getting that close. Otherwise the route ends at `goal`.
    pub fn search<F: RiskField>(
        &mut self,
        field: &mut F,
        start: Point,
        goal: Point,
    ) -> Result<Route, SearchError> {
        let radius = self.config.closeness_radius;
        if radius <= 0 {
            return Err(SearchError::NonPositiveRadius(radius));
        }
        if !field.is_valid(start) {
            return Err(SearchError::InvalidStart(start));
        }
        if !field.is_valid(goal) {
            return Err(SearchError::InvalidGoal(goal));
        }

        let reach = f64::from(radius);
        if start.is_within(goal, reach) {
            self.stats = SearchStats::default();
            return Ok(Route::default());
        }

        let started = Instant::now();
        self.registry.clear();
        self.open.clear();
        self.seq = 0;

        let start_id = self.registry.resolve(start);
        {
            let w = self.registry.get_mut(start_id);
            w.g = 0.0;
            w.f = euclidean(start, goal);
            w.queued = true;
        }
        let start_f = self.registry.get(start_id).f;
        self.push(start_id, start_f);

        let mut expanded = 0;
        let mut reached = None;

        while let Some(entry) = self.open.pop() {
            let ci = entry.id;
            let current = {
                let w = self.registry.get_mut(ci);
                if self.config.requeue == Requeue::Lazy && (w.closed || entry.f != w.f) {
                    continue;
                }
                w.queued = false;
                w.closed = true;
                *w
            };
            expanded += 1;

            if current.is_within(goal, reach) {
                reached = Some(ci);
                break;
            }

            let registry = &self.registry;
            let nbrs = self.neighbors.ring_towards(current.pos, radius, goal, |n| {
                field.is_valid(n) && !registry.is_closed(n)
            });

            for &np in nbrs {
                let ni = self.registry.resolve(np);
                let tentative_g = current.g + euclidean(current.pos, np);

                let n = self.registry.get_mut(ni);
                if tentative_g >= n.g {
                    continue;
                }
                n.g = tentative_g;
                n.parent = Some(ci);
                n.f = tentative_g + risk_estimate(field.risk(np), np, goal);

                // Without requeueing an already queued waypoint keeps its
                // old priority even though its score just improved.
                let push = match self.config.requeue {
                    Requeue::Never => !n.queued,
                    Requeue::Lazy => true,
                };
                if push {
                    n.queued = true;
                    self.open.push(QueueEntry {
                        id: ni,
                        f: n.f,
                        seq: self.seq,
                    });
                    self.seq += 1;
                }
            }
        }

        self.stats = SearchStats {
            expanded,
            created: self.registry.len(),
            elapsed: started.elapsed(),
        };

        let route = match reached {
            Some(id) => self.backtrack(id, goal),
            None => Route::default(),
        };
        log::debug!(
            "route search {start} -> {goal}: {} waypoints, expanded {}, created {}, {:?}",
            route.len(),
            self.stats.expanded,
            self.stats.created,
            self.stats.elapsed
        );
        Ok(route)
    }

    fn push(&mut self, id: WaypointId, f: f64) {
        let seq = self.seq;
        self.seq += 1;
        self.open.push(QueueEntry { id, f, seq });
    }

    /// Rebuild the route ending at `reached`, appending `goal` when the
    /// search stopped short of it. The start waypoint is left out.
    fn backtrack(&self, reached: WaypointId, goal: Point) -> Route {
        let mut route = Route::default();
        let mut id = reached;
        if self.registry.get(id).pos != goal {
            route.push_front(goal);
        }
        while let Some(parent) = self.registry.get(id).parent {
            route.push_front(self.registry.get(id).pos);
            id = parent;
        }
        route
    }
}

/// Plan a route with the default [`SearchConfig`].
///
/// Convenience wrapper around [`RouteSearch::search`] for one-off queries.
pub fn search<F: RiskField>(start: Point, goal: Point, field: &mut F) -> Result<Route, SearchError> {
    RouteSearch::default().search(field, start, goal)
}
