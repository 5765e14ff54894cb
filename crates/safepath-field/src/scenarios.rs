//! Route search running over a real hazard map.

use safepath_core::{Clock, ManualClock, Point, SystemClock};
use safepath_paths::{CLOSENESS_RADIUS, Requeue, RouteSearch, SearchConfig, SearchError};

use crate::{FieldConfig, HazardMap, OBSTACLE_POTENTIAL, TerrainGrid};

fn walled(width: usize, height: usize, blocked: &[Point]) -> TerrainGrid {
    let mut t = TerrainGrid::open(width as i32, height as i32);
    for &p in blocked {
        t.set_walkable(p, false);
    }
    t
}

fn assert_route_valid<C: Clock>(map: &HazardMap<C>, route: &[Point], goal: Point) {
    for &p in route {
        assert!(map.is_valid(p), "route crosses invalid cell {p}");
    }
    let last = route.last().copied().unwrap_or(goal);
    assert!(last.is_within(goal, f64::from(CLOSENESS_RADIUS)));
}

#[test]
fn open_ten_by_ten_reaches_the_far_corner() {
    let mut map = HazardMap::new(&TerrainGrid::open(10, 10), ManualClock::new(0.0));
    let goal = Point::new(9, 9);
    let route: Vec<Point> = RouteSearch::default()
        .search(&mut map, Point::new(0, 0), goal)
        .unwrap()
        .collect();
    assert!(!route.is_empty());
    assert_eq!(route.last(), Some(&goal));
    assert_route_valid(&map, &route, goal);
}

#[test]
fn close_start_gives_empty_route() {
    let mut map = HazardMap::new(&TerrainGrid::open(10, 10), ManualClock::new(0.0));
    let route = RouteSearch::default()
        .search(&mut map, Point::new(0, 0), Point::new(2, 2))
        .unwrap();
    assert!(route.is_empty());
}

#[test]
fn every_close_start_gives_empty_route() {
    let mut map = HazardMap::new(&TerrainGrid::open(20, 20), ManualClock::new(0.0));
    let goal = Point::new(10, 10);
    let mut search = RouteSearch::default();
    for dx in -5..=5 {
        for dy in -5..=5 {
            let start = goal.shift(dx, dy);
            if start.is_within(goal, 5.0) {
                assert!(search.search(&mut map, start, goal).unwrap().is_empty());
            }
        }
    }
}

#[test]
fn route_never_crosses_the_obstacle() {
    let obstacle = Point::new(10, 5);
    let terrain = walled(21, 11, &[obstacle]);
    let mut map = HazardMap::new(&terrain, ManualClock::new(0.0));
    assert_eq!(map.potential(Point::new(9, 5)), Ok(OBSTACLE_POTENTIAL));
    assert_eq!(map.potential(Point::new(11, 6)), Ok(OBSTACLE_POTENTIAL));

    let goal = Point::new(20, 5);
    for requeue in [Requeue::Never, Requeue::Lazy] {
        let mut search = RouteSearch::new(SearchConfig {
            requeue,
            ..SearchConfig::default()
        });
        let route: Vec<Point> = search.search(&mut map, Point::new(0, 5), goal).unwrap().collect();
        assert!(!route.is_empty());
        assert!(!route.contains(&obstacle));
        assert_route_valid(&map, &route, goal);
    }
}

#[test]
fn threat_marks_push_the_route_aside() {
    let mut map = HazardMap::new(&TerrainGrid::open(41, 41), ManualClock::new(0.0));
    let start = Point::new(0, 20);
    let goal = Point::new(40, 20);
    map.set_area_potential(Point::new(20, 20), 6, 150.0, true).unwrap();

    let route: Vec<Point> = RouteSearch::default()
        .search(&mut map, start, goal)
        .unwrap()
        .collect();
    assert_route_valid(&map, &route, goal);
    assert!(
        route.iter().all(|p| (p.y - 20).abs() > 6 || (p.x - 20).abs() > 6),
        "route enters the marked area: {route:?}"
    );
}

#[test]
fn decayed_marks_no_longer_deflect() {
    let clock = ManualClock::new(0.0);
    let mut map = HazardMap::new(&TerrainGrid::open(41, 41), clock.clone());
    let start = Point::new(0, 20);
    let goal = Point::new(40, 20);
    map.set_area_potential(Point::new(20, 20), 6, 150.0, true).unwrap();
    clock.advance(41.0);

    let route: Vec<Point> = RouteSearch::default()
        .search(&mut map, start, goal)
        .unwrap()
        .collect();
    assert!(route.iter().all(|p| p.y == 20), "{route:?}");
}

#[test]
fn walled_off_goal_gives_empty_route() {
    // Thicker than one coarse step, so the lattice cannot hop across.
    let wall: Vec<Point> = (8..14)
        .flat_map(|x| (0..12).map(move |y| Point::new(x, y)))
        .collect();
    let terrain = walled(24, 12, &wall);
    let mut map = HazardMap::new(&terrain, ManualClock::new(0.0));
    let route = RouteSearch::default()
        .search(&mut map, Point::new(1, 6), Point::new(22, 6))
        .unwrap();
    assert!(route.is_empty());
}

#[test]
fn blocked_endpoints_are_rejected() {
    let terrain = walled(12, 12, &[Point::new(11, 11)]);
    let mut map = HazardMap::new(&terrain, ManualClock::new(0.0));
    let err = RouteSearch::default()
        .search(&mut map, Point::new(0, 0), Point::new(11, 11))
        .unwrap_err();
    assert_eq!(err, SearchError::InvalidGoal(Point::new(11, 11)));
}

// ---------------------------------------------------------------------------
// Obstacle penalties and the decay rule
// ---------------------------------------------------------------------------

// Obstacle penalties keep the epoch stamp, so the decay rule treats them as
// stale as soon as the clock is past the decay window. With a wall clock that
// is the first read.

#[test]
fn obstacle_penalty_is_reset_by_first_wall_clock_read() {
    let terrain = walled(5, 5, &[Point::new(2, 2)]);
    let mut map = HazardMap::new(&terrain, SystemClock);
    let p = Point::new(1, 2);
    assert_eq!(map.cells_above(1.0).count(), 8);
    assert_eq!(map.potential(p), Ok(1.0));
    assert_eq!(map.cells_above(1.0).count(), 7);
}

#[test]
fn obstacle_penalty_lasts_one_window_on_a_manual_clock() {
    let clock = ManualClock::new(0.0);
    let terrain = walled(5, 5, &[Point::new(2, 2)]);
    let mut map = HazardMap::new(&terrain, clock.clone());
    let p = Point::new(3, 3);
    clock.set(40.0);
    assert_eq!(map.potential(p), Ok(OBSTACLE_POTENTIAL));
    clock.advance(1.0);
    assert_eq!(map.potential(p), Ok(1.0));
}

#[test]
fn pinned_obstacle_penalty_never_decays() {
    let config = FieldConfig {
        pin_static_penalties: true,
        ..FieldConfig::default()
    };
    let terrain = walled(5, 5, &[Point::new(2, 2)]);
    let mut map = HazardMap::with_config(&terrain, SystemClock, config).unwrap();
    let p = Point::new(1, 1);
    assert_eq!(map.potential(p), Ok(OBSTACLE_POTENTIAL));
    assert_eq!(map.potential(p), Ok(OBSTACLE_POTENTIAL));

    // A stamped threat mark over a pinned cell decays normally again.
    let clock = ManualClock::new(0.0);
    let mut map = HazardMap::with_config(&terrain, clock.clone(), config).unwrap();
    map.set_area_potential(p, 1, 150.0, true).unwrap();
    clock.advance(50.0);
    assert_eq!(map.potential(p), Ok(1.0));
}
