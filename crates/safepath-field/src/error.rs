use safepath_core::Point;

/// Contract violations reported by [`HazardMap`](crate::HazardMap).
///
/// These are caller programming errors: nothing inside the map retries or
/// recovers from them.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("position {0} is out of bounds or impassable")]
    InvalidPosition(Point),
    #[error("position {0} is out of bounds")]
    OutOfBounds(Point),
    #[error("radius must be positive, got {0}")]
    NonPositiveRadius(i32),
    #[error("time stamp must be non-negative, got {0}")]
    NegativeTime(f64),
}

/// Errors raised while parsing an ASCII terrain picture.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TerrainError {
    #[error("terrain is empty")]
    Empty,
    #[error("terrain line {line} is {found} wide, expected {expected}")]
    InconsistentWidth {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("terrain contains invalid character \u{201c}{ch}\u{201d} at {pos}")]
    InvalidChar { ch: char, pos: Point },
}
