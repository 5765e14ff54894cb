/// Distance (in cells) below which a position counts as reached. Also the
/// expansion step of the search.
pub const CLOSENESS_RADIUS: i32 = 5;

/// What to do with a neighbor that is already queued when a cheaper way to
/// reach it is found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Requeue {
    /// Update its scores but keep the queued entry at its old priority.
    #[default]
    Never,
    /// Push it again with the new priority and drop stale entries on pop.
    Lazy,
}

/// Tuning for [`RouteSearch`](crate::RouteSearch).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Reach radius around the goal and coarse expansion step. Must be > 0.
    pub closeness_radius: i32,
    pub requeue: Requeue,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            closeness_radius: CLOSENESS_RADIUS,
            requeue: Requeue::Never,
        }
    }
}
