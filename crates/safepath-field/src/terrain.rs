use safepath_core::{Grid, Point};

use crate::error::TerrainError;

/// Static map collaborator queried by [`HazardMap`](crate::HazardMap).
///
/// Only consulted while building the hazard map; afterwards the map keeps
/// its own passability layer.
pub trait Terrain {
    fn width(&self) -> i32;
    fn height(&self) -> i32;

    /// Whether a unit can stand on `p`. Only called for in-bounds points.
    fn is_walkable(&self, p: Point) -> bool;

    /// Bounds check against `[0, width) × [0, height)`.
    fn is_valid_position(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width() && p.y < self.height()
    }
}

impl<T: Terrain + ?Sized> Terrain for &T {
    fn width(&self) -> i32 {
        (**self).width()
    }

    fn height(&self) -> i32 {
        (**self).height()
    }

    fn is_walkable(&self, p: Point) -> bool {
        (**self).is_walkable(p)
    }
}

/// Walkability layer backed by a [`Grid<bool>`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainGrid {
    walkable: Grid<bool>,
}

impl TerrainGrid {
    /// A fully walkable terrain of the given size.
    pub fn open(width: i32, height: i32) -> Self {
        Self {
            walkable: Grid::new(width, height, true),
        }
    }

    /// Parse an ASCII picture where `#` is blocked and `.` is open.
    pub fn parse(s: &str) -> Result<Self, TerrainError> {
        Self::parse_with(s, |_, ch| match ch {
            '#' => Some(false),
            '.' => Some(true),
            _ => None,
        })
    }

    /// Parse an ASCII picture with a custom character mapping.
    ///
    /// `f` returns the walkability of a character, or `None` to reject it.
    /// Leading and trailing whitespace is trimmed from the whole string but
    /// not from individual lines; every line must have the same width.
    pub fn parse_with(
        s: &str,
        mut f: impl FnMut(Point, char) -> Option<bool>,
    ) -> Result<Self, TerrainError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TerrainError::Empty);
        }
        let mut cells = Vec::with_capacity(s.len());
        let mut width = None;
        let mut height = 0;
        for (y, line) in s.lines().enumerate() {
            let mut x = 0;
            for ch in line.chars() {
                let pos = Point::new(x as i32, y as i32);
                cells.push(f(pos, ch).ok_or(TerrainError::InvalidChar { ch, pos })?);
                x += 1;
            }
            match width {
                None => width = Some(x),
                Some(w) if w != x => {
                    return Err(TerrainError::InconsistentWidth {
                        line: y,
                        expected: w,
                        found: x,
                    });
                }
                Some(_) => {}
            }
            height += 1;
        }
        let width = width.unwrap_or(0) as i32;
        let mut cells = cells.into_iter();
        let walkable = Grid::from_fn(width, height, |_| cells.next().unwrap_or(false));
        Ok(Self { walkable })
    }

    /// Change the walkability of one cell. Returns `false` when out of bounds.
    pub fn set_walkable(&mut self, p: Point, walkable: bool) -> bool {
        self.walkable.set(p, walkable)
    }

    /// Number of walkable cells.
    pub fn walkable_count(&self) -> usize {
        self.walkable.count_fn(|_, &w| w)
    }

    /// The underlying walkability grid.
    pub fn grid(&self) -> &Grid<bool> {
        &self.walkable
    }
}

impl Terrain for TerrainGrid {
    fn width(&self) -> i32 {
        self.walkable.width()
    }

    fn height(&self) -> i32 {
        self.walkable.height()
    }

    fn is_walkable(&self, p: Point) -> bool {
        self.walkable.at(p).copied().unwrap_or(false)
    }
}
