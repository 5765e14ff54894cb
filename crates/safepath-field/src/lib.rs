//! Hazard map for risk-aware route planning.
//!
//! [`HazardMap`] stores a potential, a passability flag and a last-update
//! time per cell. Static obstacles are stamped with a penalty when the map
//! is built; threat detection keeps stamping short-lived marks that decay
//! back to baseline once the decay window has passed. The map implements
//! [`RiskField`](safepath_paths::RiskField), so it plugs straight into
//! [`RouteSearch`](safepath_paths::RouteSearch).
//!
//! ```
//! use safepath_core::{ManualClock, Point};
//! use safepath_field::{HazardMap, TerrainGrid};
//! use safepath_paths::RouteSearch;
//!
//! let terrain = TerrainGrid::parse("....\n.#..\n....").unwrap();
//! let mut map = HazardMap::new(&terrain, ManualClock::new(0.0));
//! map.set_area_potential(Point::new(2, 2), 1, 150.0, true).unwrap();
//! let route = RouteSearch::default()
//!     .search(&mut map, Point::new(0, 0), Point::new(3, 2))
//!     .unwrap();
//! assert!(route.is_empty());
//! ```

mod config;
mod error;
mod evasion;
mod hazard;
mod terrain;

#[cfg(test)]
mod scenarios;

pub use config::{BASELINE_POTENTIAL, DECAY_WINDOW, FieldConfig, K_REP, NEVER_DECAYS, OBSTACLE_POTENTIAL};
pub use error::{FieldError, TerrainError};
pub use evasion::repulsion;
pub use hazard::{HazardCell, HazardMap, Optimum};
pub use terrain::{Terrain, TerrainGrid};
