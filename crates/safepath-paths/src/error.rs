use safepath_core::Point;

/// Contract violations reported by [`RouteSearch`](crate::RouteSearch).
///
/// "No route" is not an error: it is an empty [`Route`](crate::Route).
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum SearchError {
    #[error("search start {0} is out of bounds or impassable")]
    InvalidStart(Point),
    #[error("search goal {0} is out of bounds or impassable")]
    InvalidGoal(Point),
    #[error("closeness radius must be positive, got {0}")]
    NonPositiveRadius(i32),
}
