//! Risk-aware route search for grid maps.
//!
//! The planner treats the map as a continuous cost surface rather than a
//! passable/impassable mask: every cell carries a hazard potential that
//! stretches the distance heuristic, steering routes away from danger.
//!
//! - [`RouteSearch`] plans routes and reuses its arena between calls.
//! - [`search`] is the one-shot convenience entry point.
//! - [`Route`] is the LIFO sequence of positions the follower consumes.
//!
//! The search is not admissible on purpose: it prefers safe routes over
//! short ones, so it does not guarantee shortest paths.
//!
//! # Trait seam
//!
//! | Trait | Provided by |
//! |---|---|
//! | [`RiskField`] | the hazard map (validity + decaying potential) |

mod config;
mod distance;
mod error;
mod neighbors;
mod route;
mod search;
mod traits;
mod waypoint;

pub use config::{CLOSENESS_RADIUS, Requeue, SearchConfig};
pub use distance::{euclidean, risk_estimate};
pub use error::SearchError;
pub use neighbors::CoarseNeighbors;
pub use route::Route;
pub use search::{RouteSearch, SearchStats, search};
pub use traits::RiskField;
pub use waypoint::{Waypoint, WaypointId};
