/// Fuzzes the search by checking for many random grids that a path is found exactly when the goal
/// is reachable according to the connected components, and that its length matches a
/// breadth-first search. All heuristics and tie-break policies are tested.
use astar_trace::{
    heuristic::{Chebyshev, Heuristic, Manhattan, Zero},
    search::{PathSearch, SearchConfig, TieBreak},
    search_grid::SearchGrid,
    trace::{StepKind, StepRecord},
    Point,
};
use rand::prelude::*;
use std::collections::{HashMap, VecDeque};

fn random_grid(n: usize, rng: &mut StdRng) -> SearchGrid {
    let mut grid = SearchGrid::new(n);
    for x in 0..n as i32 {
        for y in 0..n as i32 {
            grid.set_wall(x, y, rng.gen_bool(0.35))
        }
    }
    grid
}

fn visualize_grid(grid: &SearchGrid, start: &Point, end: &Point) {
    for y in 0..grid.size() as i32 {
        for x in 0..grid.size() as i32 {
            let p = Point::new(x, y);
            if *start == p {
                print!("S");
            } else if *end == p {
                print!("G");
            } else if grid.is_wall(x, y) {
                print!("#");
            } else {
                print!(".");
            }
        }
        println!();
    }
}

/// Number of moves on a shortest path, if any.
fn bfs_distance(grid: &SearchGrid, start: Point, goal: Point) -> Option<usize> {
    let mut dist = HashMap::new();
    let mut queue = VecDeque::new();
    dist.insert(start, 0);
    queue.push_back(start);
    while let Some(p) = queue.pop_front() {
        if p == goal {
            return dist.get(&p).copied();
        }
        let d = dist[&p];
        for n in grid.passable_neighbours(&p) {
            if !dist.contains_key(&n) {
                dist.insert(n, d + 1);
                queue.push_back(n);
            }
        }
    }
    None
}

fn configs() -> Vec<SearchConfig> {
    [TieBreak::FirstInserted, TieBreak::LastInserted]
        .into_iter()
        .map(|tie_break| SearchConfig {
            tie_break,
            ..SearchConfig::default()
        })
        .collect()
}

fn check_against_bfs<H: Heuristic>(search: &PathSearch<H>, grid: &mut SearchGrid) {
    let n = grid.size() as i32;
    let start = Point::new(0, 0);
    let end = Point::new(n - 1, n - 1);
    grid.set_wall(start.x, start.y, false);
    grid.set_wall(end.x, end.y, false);
    grid.update();
    let reachable = grid.reachable(&start, &end);
    let expected = bfs_distance(grid, start, end);
    let outcome = search.run(grid, start, end).unwrap();
    // Show the grid if the outcome is off
    if outcome.is_found() != reachable {
        visualize_grid(grid, &start, &end);
    }
    assert_eq!(outcome.is_found(), reachable);
    assert_eq!(outcome.is_found(), expected.is_some());
    if let Some(path) = outcome.path() {
        assert_eq!(path.len() - 1, expected.unwrap());
        assert!(path.iter().all(|p| !grid.is_wall(p.x, p.y)));
        assert!(path
            .windows(2)
            .all(|w| w[0].manhattan_distance(&w[1]) == 1));
        assert_eq!(outcome.trace().last().unwrap().kind, StepKind::GoalReached);
    }
}

#[test]
fn fuzz() {
    const N: usize = 10;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    for config in configs() {
        let manhattan = PathSearch::with_config(Manhattan, config);
        let chebyshev = PathSearch::with_config(Chebyshev, config);
        let dijkstra = PathSearch::with_config(Zero, config);
        for _ in 0..N_GRIDS {
            let mut grid = random_grid(N, &mut rng);
            check_against_bfs(&manhattan, &mut grid);
            check_against_bfs(&chebyshev, &mut grid);
            check_against_bfs(&dijkstra, &mut grid);
        }
    }
}

/// Every cost assigned to a cell is one more than the cost of the expanded cell, and later
/// assignments to the same cell never increase it.
#[test]
fn fuzz_monotone_costs() {
    const N: usize = 8;
    const N_GRIDS: usize = 500;
    let mut rng = StdRng::seed_from_u64(1);
    let search = PathSearch::new(Manhattan);
    for _ in 0..N_GRIDS {
        let mut grid = random_grid(N, &mut rng);
        grid.set_wall(0, 0, false);
        grid.set_wall(N as i32 - 1, N as i32 - 1, false);
        let outcome = search
            .run(&mut grid, Point::new(0, 0), Point::new(N as i32 - 1, N as i32 - 1))
            .unwrap();
        let mut best: HashMap<Point, i32> = HashMap::new();
        for record in outcome.trace() {
            for relaxation in &record.relaxed {
                assert_eq!(relaxation.g, record.g + 1);
                assert_eq!(relaxation.f, relaxation.g + relaxation.h);
                if let Some(previous) = best.insert(relaxation.cell, relaxation.g) {
                    assert!(relaxation.g < previous);
                }
            }
            if record.kind == StepKind::Expanded {
                assert!(record.visited.contains(&record.current));
            }
        }
    }
}

#[test]
fn fuzz_deterministic() {
    const N: usize = 10;
    const N_GRIDS: usize = 200;
    let mut rng = StdRng::seed_from_u64(2);
    let search = PathSearch::new(Manhattan);
    for _ in 0..N_GRIDS {
        let mut grid = random_grid(N, &mut rng);
        let start = Point::new(rng.gen_range(0..N as i32), rng.gen_range(0..N as i32));
        let goal = Point::new(rng.gen_range(0..N as i32), rng.gen_range(0..N as i32));
        grid.set_wall(start.x, start.y, false);
        grid.set_wall(goal.x, goal.y, false);
        if start == goal {
            continue;
        }
        let first = search.run(&mut grid, start, goal).unwrap();
        let second = search.run(&mut grid, start, goal).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn open_grid_paths() {
    let search = PathSearch::new(Manhattan);
    let mut grid = SearchGrid::default();
    for (start, goal) in [
        (Point::new(0, 0), Point::new(1, 0)),
        (Point::new(3, 3), Point::new(3, 4)),
        (Point::new(0, 0), Point::new(9, 9)),
        (Point::new(9, 0), Point::new(0, 9)),
    ] {
        let path = search.run(&mut grid, start, goal).unwrap().into_path().unwrap();
        assert_eq!(path.len() as i32 - 1, start.manhattan_distance(&goal));
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&goal));
    }
}

/// Front ends can build their own records, e.g. for a replay entry, and render them.
#[test]
fn record_built_outside_the_crate() {
    let record = StepRecord {
        kind: StepKind::PathNode,
        current: Point::new(2, 1),
        node: 12,
        g: 3,
        h: 0,
        f: 3,
        frontier: vec![],
        visited: vec![Point::new(0, 1), Point::new(1, 1)],
        relaxed: vec![],
        size: 10,
    };
    assert_eq!(
        record.to_string(),
        "Node 12 Details: g=3 h=0 f=3\nOpen Set: []\nClosed Set: [10, 11]"
    );
}
