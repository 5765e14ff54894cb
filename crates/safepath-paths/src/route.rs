use safepath_core::Point;

/// An ordered sequence of waypoint positions produced by one search.
///
/// The route is a stack: the next position to travel to sits on top, and
/// [`next`](Iterator::next) pops positions in start→goal order until the
/// goal has been handed out. The start position itself is not included.
/// An empty route means "already there" or "no route found".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Goal at the bottom, next waypoint at the top.
    stack: Vec<Point>,
}

impl Route {
    /// Build a route from positions listed in travel order.
    pub fn from_waypoints(waypoints: impl IntoIterator<Item = Point>) -> Self {
        let mut stack: Vec<Point> = waypoints.into_iter().collect();
        stack.reverse();
        Self { stack }
    }

    /// Push a position that will be handed out *before* everything already
    /// on the route. Used while backtracking from goal to start.
    pub(crate) fn push_front(&mut self, p: Point) {
        self.stack.push(p);
    }

    /// Number of positions left.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Whether the route has been fully consumed (or was never found).
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// The next position without consuming it.
    pub fn peek(&self) -> Option<Point> {
        self.stack.last().copied()
    }

    /// The final position of the route.
    pub fn destination(&self) -> Option<Point> {
        self.stack.first().copied()
    }

    /// Remaining positions in travel order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Point> + '_ {
        self.stack.iter().rev().copied()
    }
}

impl Iterator for Route {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        self.stack.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.len(), Some(self.stack.len()))
    }
}
