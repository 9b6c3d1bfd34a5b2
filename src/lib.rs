//! # astar_trace
//!
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) on a small square grid where every
//! iteration of the search is recorded. Cells are either walls or free, movement is 4-connected
//! and every move costs [EDGE_COST]. Besides the path, a run yields a [Trace](trace::Trace):
//! one [StepRecord](trace::StepRecord) per expanded cell holding its g, h and f values and
//! snapshots of the open and closed sets, meant to be replayed by a front end at its own pace.
//!
//! ```
//! use astar_trace::{heuristic::Manhattan, search_grid::SearchGrid, Point};
//!
//! let mut grid = SearchGrid::new(3);
//! grid.set_wall(1, 1, true);
//! let outcome = astar_trace::run(&mut grid, Point::new(0, 0), Point::new(2, 2), Manhattan).unwrap();
//! assert_eq!(outcome.path().unwrap().len(), 5);
//! ```
pub mod cell;
pub mod error;
pub mod heuristic;
pub mod search;
pub mod search_grid;
pub mod trace;

pub use grid_util::point::Point;

use crate::error::SearchError;
use crate::heuristic::Heuristic;
use crate::search::{PathSearch, SearchOutcome};
use crate::search_grid::SearchGrid;

/// Side length of the grid the visualizer works with.
pub const DEFAULT_GRID_SIZE: usize = 10;
/// Cost of a single orthogonal move.
pub const EDGE_COST: i32 = 1;

/// Runs A* from `start` to `goal` with the default [SearchConfig](search::SearchConfig).
pub fn run<H: Heuristic>(
    grid: &mut SearchGrid,
    start: Point,
    goal: Point,
    heuristic: H,
) -> Result<SearchOutcome, SearchError> {
    PathSearch::new(heuristic).run(grid, start, goal)
}
