//! Scout tuning, loadable from JSON.

use serde::{Deserialize, Serialize};

use safepath_field::FieldConfig;
use safepath_paths::SearchConfig;

/// Potential stamped around a threat that can attack the scout.
pub const HIGH_THREAT_POTENTIAL: f64 = 150.0;
/// Potential stamped around a threat that is merely in sight.
pub const MODERATE_THREAT_POTENTIAL: f64 = 50.0;

/// Every knob of the scouting loop. Missing JSON fields keep their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoutConfig {
    /// Distance under which a scout target counts as visited.
    pub arrival_radius: i32,
    /// Distance under which the current route point counts as reached.
    pub point_radius: i32,
    /// Seconds allowed to reach one route point before replanning.
    pub point_search_time: f64,
    /// Ticks without moving before the scout gives up on its target.
    pub stuck_ticks: u32,
    /// Half-size of the square marked around each threat.
    pub threat_radius: i32,
    pub high_threat_potential: f64,
    pub moderate_threat_potential: f64,
    /// Simulated seconds per tick.
    pub tick_seconds: f64,
    pub field: FieldConfig,
    pub search: SearchConfig,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            arrival_radius: 5,
            point_radius: 4,
            point_search_time: 10.0,
            stuck_ticks: 5,
            threat_radius: 1,
            high_threat_potential: HIGH_THREAT_POTENTIAL,
            moderate_threat_potential: MODERATE_THREAT_POTENTIAL,
            tick_seconds: 0.5,
            field: FieldConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl ScoutConfig {
    /// Parse a (possibly partial) JSON config.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}
