//! Scenario maps: ASCII terrain plus the scout's start, targets and threats.
//!
//! | Char | Meaning |
//! |---|---|
//! | `#` | blocked |
//! | `.` | open |
//! | `S` | scout start (exactly one) |
//! | `1`..`9` | scout targets, visited in digit order |
//! | `E` | threat |

use safepath_core::Point;
use safepath_field::{TerrainError, TerrainGrid};

/// The map used when no `--map` is given.
pub const OUTPOST: &str = include_str!("../maps/outpost.txt");

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Terrain(#[from] TerrainError),
    #[error("map has no scout start `S`")]
    MissingStart,
    #[error("map has a second scout start at {0}")]
    DuplicateStart(Point),
    #[error("map has no scout targets `1`..`9`")]
    NoTargets,
}

/// A parsed scenario map.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub terrain: TerrainGrid,
    pub start: Point,
    pub targets: Vec<Point>,
    pub threats: Vec<Point>,
}

impl Scenario {
    pub fn parse(s: &str) -> Result<Self, ScenarioError> {
        let mut starts = Vec::new();
        let mut targets = Vec::new();
        let mut threats = Vec::new();
        let terrain = TerrainGrid::parse_with(s, |p, ch| match ch {
            '#' => Some(false),
            '.' => Some(true),
            'S' => {
                starts.push(p);
                Some(true)
            }
            'E' => {
                threats.push(p);
                Some(true)
            }
            '1'..='9' => {
                targets.push((ch, p));
                Some(true)
            }
            _ => None,
        })?;
        let start = match starts.as_slice() {
            [] => return Err(ScenarioError::MissingStart),
            [start] => *start,
            [_, second, ..] => return Err(ScenarioError::DuplicateStart(*second)),
        };
        if targets.is_empty() {
            return Err(ScenarioError::NoTargets);
        }
        // Stable: equal digits keep reading order.
        targets.sort_by_key(|&(ch, _)| ch);
        Ok(Self {
            terrain,
            start,
            targets: targets.into_iter().map(|(_, p)| p).collect(),
            threats,
        })
    }
}
