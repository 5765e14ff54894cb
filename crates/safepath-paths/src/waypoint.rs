use std::collections::HashMap;

use safepath_core::Point;

/// Index of a [`Waypoint`] inside the registry of one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WaypointId(usize);

/// A search vertex: a grid position plus search bookkeeping.
///
/// `g` is the accumulated cost from the start, `f` the risk-weighted
/// priority. Both start at `+∞`. `parent` points back into the same
/// registry and is only used to rebuild the route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub pos: Point,
    pub parent: Option<WaypointId>,
    pub g: f64,
    pub f: f64,
    pub(crate) queued: bool,
    pub(crate) closed: bool,
}

impl Waypoint {
    /// A fresh, unscored waypoint at `pos`.
    pub fn new(pos: Point) -> Self {
        Self {
            pos,
            parent: None,
            g: f64::INFINITY,
            f: f64::INFINITY,
            queued: false,
            closed: false,
        }
    }

    /// Whether this waypoint lies within `radius` of `p`.
    #[inline]
    pub fn is_within(&self, p: Point, radius: f64) -> bool {
        self.pos.is_within(p, radius)
    }
}

// ---------------------------------------------------------------------------
// Registry (per-search arena)
// ---------------------------------------------------------------------------

/// Position-keyed arena owning every waypoint created during one search.
///
/// Waypoints refer to each other by [`WaypointId`] only, so clearing the
/// registry drops the whole search state at once.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    nodes: Vec<Waypoint>,
    index: HashMap<Point, WaypointId>,
}

impl Registry {
    /// Forget every waypoint, keeping the allocations.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.index.clear();
    }

    /// Return the waypoint for `pos`, creating it on first use.
    pub(crate) fn resolve(&mut self, pos: Point) -> WaypointId {
        if let Some(&id) = self.index.get(&pos) {
            return id;
        }
        let id = WaypointId(self.nodes.len());
        self.nodes.push(Waypoint::new(pos));
        self.index.insert(pos, id);
        id
    }

    /// Whether the waypoint at `pos` exists and has been expanded.
    pub(crate) fn is_closed(&self, pos: Point) -> bool {
        self.index
            .get(&pos)
            .is_some_and(|&id| self.nodes[id.0].closed)
    }

    #[inline]
    pub(crate) fn get(&self, id: WaypointId) -> &Waypoint {
        &self.nodes[id.0]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: WaypointId) -> &mut Waypoint {
        &mut self.nodes[id.0]
    }

    /// Number of waypoints created so far.
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }
}

// ---------------------------------------------------------------------------
// Open-set entries
// ---------------------------------------------------------------------------

/// Reference into the registry, ordered by `f` for use in `BinaryHeap`.
///
/// `f` is a snapshot taken at push time. Ties are broken by insertion
/// order (`seq`), earliest first.
#[derive(Debug, Clone, Copy)]
pub(crate) struct QueueEntry {
    pub(crate) id: WaypointId,
    pub(crate) f: f64,
    pub(crate) seq: u64,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f, then oldest seq.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
