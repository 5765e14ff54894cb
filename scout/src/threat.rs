//! Threat detection and marking on the hazard map.

use safepath_core::{Clock, Point};
use safepath_field::HazardMap;

use crate::config::ScoutConfig;

/// A hostile unit seen on the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threat {
    pub pos: Point,
    pub attack_range: f64,
    pub sight_range: f64,
}

/// The scouting unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit {
    pub pos: Point,
    pub sight_range: f64,
}

/// How dangerous a threat is to a given unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    Moderate,
    High,
}

impl Threat {
    /// `High` when the unit is within attack range, `Moderate` when either
    /// side can see the other, `None` otherwise.
    pub fn tier(&self, unit: &Unit) -> Option<Tier> {
        let d = unit.pos.distance(self.pos);
        if d <= self.attack_range {
            Some(Tier::High)
        } else if d <= self.sight_range || d <= unit.sight_range {
            Some(Tier::Moderate)
        } else {
            None
        }
    }
}

/// Stamp time-limited potentials around every threat near `unit` and return
/// the positions of those threats.
///
/// Threats standing on cells the map does not consider valid are still
/// reported but left unmarked.
pub fn mark_threats<C: Clock>(
    map: &mut HazardMap<C>,
    unit: &Unit,
    threats: &[Threat],
    config: &ScoutConfig,
) -> Vec<Point> {
    let mut nearby = Vec::new();
    for threat in threats {
        let Some(tier) = threat.tier(unit) else {
            continue;
        };
        let value = match tier {
            Tier::High => config.high_threat_potential,
            Tier::Moderate => config.moderate_threat_potential,
        };
        if let Err(err) = map.set_area_potential(threat.pos, config.threat_radius, value, true) {
            log::trace!("threat at {} not marked: {err}", threat.pos);
        }
        nearby.push(threat.pos);
    }
    nearby
}

#[cfg(test)]
mod tests {
    use super::*;
    use safepath_core::ManualClock;
    use safepath_field::TerrainGrid;

    fn threat(x: i32, y: i32) -> Threat {
        Threat {
            pos: Point::new(x, y),
            attack_range: 2.0,
            sight_range: 6.0,
        }
    }

    const UNIT: Unit = Unit {
        pos: Point::new(10, 10),
        sight_range: 8.0,
    };

    #[test]
    fn tiers_by_distance() {
        assert_eq!(threat(12, 10).tier(&UNIT), Some(Tier::High));
        assert_eq!(threat(15, 10).tier(&UNIT), Some(Tier::Moderate));
        // Outside the threat's sight but inside the unit's.
        assert_eq!(threat(17, 10).tier(&UNIT), Some(Tier::Moderate));
        assert_eq!(threat(19, 10).tier(&UNIT), None);
    }

    #[test]
    fn marks_by_tier() {
        let mut map = HazardMap::new(&TerrainGrid::open(30, 30), ManualClock::new(0.0));
        let config = ScoutConfig::default();
        let threats = [threat(12, 10), threat(16, 10), threat(25, 25)];
        let nearby = mark_threats(&mut map, &UNIT, &threats, &config);
        assert_eq!(nearby, vec![Point::new(12, 10), Point::new(16, 10)]);
        assert_eq!(map.potential(Point::new(12, 11)), Ok(150.0));
        assert_eq!(map.potential(Point::new(17, 9)), Ok(50.0));
        assert_eq!(map.potential(Point::new(25, 25)), Ok(1.0));
    }

    #[test]
    fn threat_on_blocked_cell_is_reported_unmarked() {
        let mut map = HazardMap::new(&TerrainGrid::open(8, 8), ManualClock::new(0.0));
        map.set_passable(Point::new(4, 4), false).unwrap();
        let unit = Unit {
            pos: Point::new(2, 2),
            sight_range: 5.0,
        };
        let nearby = mark_threats(&mut map, &unit, &[threat(4, 4)], &ScoutConfig::default());
        assert_eq!(nearby, vec![Point::new(4, 4)]);
        assert_eq!(map.cells_above(1.0).count(), 0);
    }
}
