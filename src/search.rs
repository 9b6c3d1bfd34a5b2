//! A* over a [SearchGrid] that records every iteration. The frontier and the visited set are
//! insertion-ordered so that both the selection among equal-cost cells and the recorded snapshots
//! are reproducible.
use crate::error::{Endpoint, EndpointProblem, SearchError};
use crate::heuristic::{Heuristic, Manhattan};
use crate::search_grid::SearchGrid;
use crate::trace::{Relaxation, StepKind, StepRecord, Trace};
use crate::EDGE_COST;
use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::IndexSet;
use log::{debug, error, info, warn};

type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

/// Which cell to expand when several frontier cells share the minimal f.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// The one that entered the frontier first.
    #[default]
    FirstInserted,
    /// The one that entered the frontier last.
    LastInserted,
}

#[derive(Clone, Copy, Debug)]
pub struct SearchConfig {
    pub tie_break: TieBreak,
    /// If false, step records are produced without frontier and visited snapshots.
    pub record_snapshots: bool,
    /// Consult the grid components before searching and give up immediately, with an empty
    /// trace, if the goal lies in another component.
    pub prune_unreachable: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            tie_break: TieBreak::FirstInserted,
            record_snapshots: true,
            prune_unreachable: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    Idle,
    Running,
    Found,
    NotFound,
}

/// Result of a completed search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Found { path: Vec<Point>, trace: Trace },
    NotFound { trace: Trace },
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found { .. })
    }

    pub fn trace(&self) -> &Trace {
        match self {
            SearchOutcome::Found { trace, .. } | SearchOutcome::NotFound { trace } => trace,
        }
    }

    pub fn path(&self) -> Option<&[Point]> {
        match self {
            SearchOutcome::Found { path, .. } => Some(path),
            SearchOutcome::NotFound { .. } => None,
        }
    }

    pub fn into_path(self) -> Result<Vec<Point>, SearchError> {
        match self {
            SearchOutcome::Found { path, .. } => Ok(path),
            SearchOutcome::NotFound { .. } => Err(SearchError::NotFound),
        }
    }

    /// One [StepKind::PathNode] record per path cell, start first, with the costs the search
    /// left on the grid and empty sets. Empty if no path was found.
    pub fn path_records(&self, grid: &SearchGrid) -> Vec<StepRecord> {
        self.path()
            .unwrap_or_default()
            .iter()
            .filter_map(|p| {
                let node = grid.index(p)?;
                let cell = grid.cell_at(node);
                Some(StepRecord {
                    kind: StepKind::PathNode,
                    current: *p,
                    node,
                    g: cell.g,
                    h: cell.h,
                    f: cell.f,
                    frontier: Vec::new(),
                    visited: Vec::new(),
                    relaxed: Vec::new(),
                    size: grid.size(),
                })
            })
            .collect()
    }
}

/// A* search with a fixed heuristic and configuration, reusable across grids and runs.
#[derive(Clone, Debug, Default)]
pub struct PathSearch<H = Manhattan> {
    pub heuristic: H,
    pub config: SearchConfig,
}

impl<H: Heuristic> PathSearch<H> {
    pub fn new(heuristic: H) -> PathSearch<H> {
        PathSearch {
            heuristic,
            config: SearchConfig::default(),
        }
    }

    pub fn with_config(heuristic: H, config: SearchConfig) -> PathSearch<H> {
        PathSearch { heuristic, config }
    }

    /// Validates the endpoints and prepares a run that advances one iteration per
    /// [step](SearchRun::step). The grid's search state is cleared; walls are kept.
    pub fn start<'a>(
        &'a self,
        grid: &'a mut SearchGrid,
        start: Point,
        goal: Point,
    ) -> Result<SearchRun<'a, H>, SearchError> {
        let (start_ix, goal_ix) = validate_endpoints(grid, &start, &goal)?;
        grid.clear_search_state();
        let mut frontier = FxIndexSet::default();
        let mut status = SearchStatus::Idle;
        if self.config.prune_unreachable {
            grid.update();
        }
        if self.config.prune_unreachable && grid.unreachable(&start, &goal) {
            info!("{} is not reachable from {}", goal, start);
            status = SearchStatus::NotFound;
        } else {
            info!("Searching path from {} to {}", start, goal);
            frontier.insert(start_ix);
        }
        Ok(SearchRun {
            grid,
            search: self,
            start_ix,
            goal_ix,
            frontier,
            visited: FxIndexSet::default(),
            status,
            expansions: 0,
        })
    }

    /// Runs the search to completion and returns the path together with the full trace.
    pub fn run(
        &self,
        grid: &mut SearchGrid,
        start: Point,
        goal: Point,
    ) -> Result<SearchOutcome, SearchError> {
        self.start(grid, start, goal)?.finish()
    }

    /// Like [run](Self::run) for endpoints that may not have been selected yet.
    pub fn run_selection(
        &self,
        grid: &mut SearchGrid,
        start: Option<Point>,
        goal: Option<Point>,
    ) -> Result<SearchOutcome, SearchError> {
        let start = start.ok_or(SearchError::InvalidEndpoints(
            Endpoint::Start,
            EndpointProblem::Missing,
        ))?;
        let goal = goal.ok_or(SearchError::InvalidEndpoints(
            Endpoint::Goal,
            EndpointProblem::Missing,
        ))?;
        self.run(grid, start, goal)
    }
}

fn validate_endpoints(
    grid: &SearchGrid,
    start: &Point,
    goal: &Point,
) -> Result<(usize, usize), SearchError> {
    let check = |end: Endpoint, p: &Point| -> Result<usize, SearchError> {
        let ix = grid
            .index(p)
            .ok_or(SearchError::InvalidEndpoints(end, EndpointProblem::OutOfBounds(*p)))?;
        if grid.cell_at(ix).is_wall {
            return Err(SearchError::InvalidEndpoints(end, EndpointProblem::Wall(*p)));
        }
        Ok(ix)
    };
    let start_ix = check(Endpoint::Start, start)?;
    let goal_ix = check(Endpoint::Goal, goal)?;
    if start_ix == goal_ix {
        return Err(SearchError::InvalidEndpoints(
            Endpoint::Goal,
            EndpointProblem::Coincident(*goal),
        ));
    }
    Ok((start_ix, goal_ix))
}

/// Walks the parent links from the goal back to the start and returns the path in start to goal
/// order.
fn reconstruct_path(
    grid: &SearchGrid,
    start: usize,
    goal: usize,
) -> Result<Vec<Point>, SearchError> {
    let mut path = vec![grid.point(goal)];
    let mut ix = goal;
    while ix != start {
        match grid.cell_at(ix).parent {
            // A longer walk than there are cells can only be a cycle.
            Some(parent) if path.len() <= grid.len() => {
                ix = parent;
                path.push(grid.point(ix));
            }
            _ => {
                let at = grid.point(ix);
                error!("Parent chain from the goal breaks off at {}", at);
                return Err(SearchError::BrokenParentChain { at });
            }
        }
    }
    path.reverse();
    Ok(path)
}

/// An ongoing search holding the grid for its whole duration. Dropping it abandons the search.
pub struct SearchRun<'a, H> {
    grid: &'a mut SearchGrid,
    search: &'a PathSearch<H>,
    start_ix: usize,
    goal_ix: usize,
    frontier: FxIndexSet<usize>,
    visited: FxIndexSet<usize>,
    status: SearchStatus,
    expansions: usize,
}

impl<'a, H: Heuristic> SearchRun<'a, H> {
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// Number of cells expanded so far, not counting the goal.
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    pub fn grid(&self) -> &SearchGrid {
        self.grid
    }

    /// Linear scan for the frontier cell with minimal f. [Iterator::min_by_key] keeps the first of
    /// several equal minima, so the scan direction decides the tie-break.
    fn select_current(&self) -> Option<usize> {
        let f = |ix: &usize| self.grid.cell_at(*ix).f;
        match self.search.config.tie_break {
            TieBreak::FirstInserted => self.frontier.iter().copied().min_by_key(f),
            TieBreak::LastInserted => self.frontier.iter().rev().copied().min_by_key(f),
        }
    }

    /// Performs one iteration of the search loop and returns its record, or [None] once the
    /// search has terminated.
    pub fn step(&mut self) -> Option<StepRecord> {
        match self.status {
            SearchStatus::Found | SearchStatus::NotFound => return None,
            SearchStatus::Idle => self.status = SearchStatus::Running,
            SearchStatus::Running => {}
        }
        let Some(current) = self.select_current() else {
            warn!(
                "Frontier exhausted after {} expansions without reaching the goal",
                self.expansions
            );
            self.status = SearchStatus::NotFound;
            return None;
        };
        if current == self.goal_ix {
            info!("Goal reached after {} expansions", self.expansions);
            self.status = SearchStatus::Found;
            return Some(self.record(StepKind::GoalReached, current, Vec::new()));
        }

        self.frontier.shift_remove(&current);
        self.visited.insert(current);
        let current_point = self.grid.point(current);
        let current_g = self.grid.cell_at(current).g;
        let goal = self.grid.point(self.goal_ix);
        let mut relaxed = Vec::new();
        for neighbour in self.grid.neighbours(&current_point) {
            let Some(n) = self.grid.index(&neighbour) else {
                continue;
            };
            if self.visited.contains(&n) || self.grid.cell_at(n).is_wall {
                continue;
            }
            let tentative_g = current_g + EDGE_COST;
            if !self.frontier.contains(&n) {
                self.frontier.insert(n);
            } else if tentative_g >= self.grid.cell_at(n).g {
                // Only strictly cheaper paths replace the parent.
                continue;
            }
            let h = self.search.heuristic.estimate(&neighbour, &goal);
            let cell = self.grid.cell_at_mut(n);
            cell.relax(current, tentative_g, h);
            relaxed.push(Relaxation {
                cell: neighbour,
                g: cell.g,
                h: cell.h,
                f: cell.f,
            });
        }
        self.expansions += 1;
        debug!(
            "Expanded {} (g={}), frontier size {}",
            current_point,
            current_g,
            self.frontier.len()
        );
        Some(self.record(StepKind::Expanded, current, relaxed))
    }

    fn record(&self, kind: StepKind, current: usize, relaxed: Vec<Relaxation>) -> StepRecord {
        let cell = self.grid.cell_at(current);
        let snapshot = |set: &FxIndexSet<usize>| -> Vec<Point> {
            if self.search.config.record_snapshots {
                set.iter().map(|&ix| self.grid.point(ix)).collect()
            } else {
                Vec::new()
            }
        };
        StepRecord {
            kind,
            current: self.grid.point(current),
            node: current,
            g: cell.g,
            h: cell.h,
            f: cell.f,
            frontier: snapshot(&self.frontier),
            visited: snapshot(&self.visited),
            relaxed,
            size: self.grid.size(),
        }
    }

    /// The path from start to goal. Only available once the goal has been reached.
    pub fn path(&self) -> Result<Vec<Point>, SearchError> {
        match self.status {
            SearchStatus::Found => reconstruct_path(self.grid, self.start_ix, self.goal_ix),
            SearchStatus::NotFound => Err(SearchError::NotFound),
            SearchStatus::Idle | SearchStatus::Running => Err(SearchError::Unfinished),
        }
    }

    /// Runs the remaining iterations and collects their records into the outcome.
    pub fn finish(mut self) -> Result<SearchOutcome, SearchError> {
        let trace = Trace(self.by_ref().collect());
        match self.status {
            SearchStatus::Found => {
                let path = self.path()?;
                info!("Found path of {} cells", path.len());
                Ok(SearchOutcome::Found { path, trace })
            }
            _ => Ok(SearchOutcome::NotFound { trace }),
        }
    }
}

impl<'a, H: Heuristic> Iterator for SearchRun<'a, H> {
    type Item = StepRecord;

    fn next(&mut self) -> Option<StepRecord> {
        self.step()
    }
}
