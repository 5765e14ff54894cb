/// Potential of a cell nobody has marked (or whose mark has aged out).
pub const BASELINE_POTENTIAL: f64 = 1.0;
/// Penalty stamped around static obstacles.
pub const OBSTACLE_POTENTIAL: f64 = 40.0;
/// Seconds after which a potential reverts to baseline on its next read.
pub const DECAY_WINDOW: f64 = 40.0;
/// Repulsion constant of the evasion force.
pub const K_REP: i32 = 1;
/// Update stamp of cells whose potential never ages out.
pub const NEVER_DECAYS: f64 = f64::INFINITY;

/// Tuning for [`HazardMap`](crate::HazardMap).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FieldConfig {
    /// Potential stamped around each non-walkable cell at construction.
    pub obstacle_potential: f64,
    /// Half-size of the square stamped around each obstacle. Must be > 0.
    pub obstacle_radius: i32,
    /// Seconds a written potential stays in force.
    pub decay_window: f64,
    /// Stamp obstacle penalties with [`NEVER_DECAYS`] instead of leaving the
    /// epoch stamp in place.
    ///
    /// Off by default: obstacle penalties then keep the epoch stamp and are
    /// reset to baseline by the first read once the decay window has passed
    /// since the epoch, which with a wall clock is the very first read.
    pub pin_static_penalties: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            obstacle_potential: OBSTACLE_POTENTIAL,
            obstacle_radius: 1,
            decay_window: DECAY_WINDOW,
            pin_static_penalties: false,
        }
    }
}
