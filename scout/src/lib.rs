//! Scout: a unit that visits a list of targets over risk-aware routes.
//!
//! The scout marks every threat it notices on a shared
//! [`HazardMap`](safepath_field::HazardMap), follows routes planned by
//! [`RouteSearch`](safepath_paths::RouteSearch) through the marked field,
//! and sidesteps nearby threats with an evasion point instead of
//! replanning. [`World`] runs the loop against a scenario map.

pub mod config;
pub mod maps;
pub mod task;
pub mod threat;
pub mod world;

pub use config::ScoutConfig;
pub use maps::{OUTPOST, Scenario, ScenarioError};
pub use task::{Order, Scout, ScoutStats, Status};
pub use threat::{Threat, Tier, Unit, mark_threats};
pub use world::{Summary, World};
