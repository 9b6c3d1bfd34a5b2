use core::fmt;
use grid_util::point::Point;
use itertools::Itertools;
use std::ops::Index;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepKind {
    /// A cell was taken from the frontier and its neighbours examined.
    Expanded,
    /// The goal was taken from the frontier; always the last record of a successful run.
    GoalReached,
    /// A cell of the final path, replayed after the search with empty sets.
    PathNode,
}

/// A neighbour whose costs were set during an expansion, either because it was newly
/// discovered or because a strictly cheaper path to it was found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Relaxation {
    pub cell: Point,
    pub g: i32,
    pub h: i32,
    pub f: i32,
}

/// Snapshot of the search after one iteration, ready for rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepRecord {
    pub kind: StepKind,
    pub current: Point,
    /// Cell number of `current`.
    pub node: usize,
    pub g: i32,
    pub h: i32,
    pub f: i32,
    /// Frontier in insertion order.
    pub frontier: Vec<Point>,
    /// Visited cells in the order they were finalised.
    pub visited: Vec<Point>,
    pub relaxed: Vec<Relaxation>,
    /// Row length of the grid, used to number the cells in the snapshots.
    pub size: usize,
}

impl StepRecord {
    fn number(&self, p: &Point) -> usize {
        p.y as usize * self.size + p.x as usize
    }
}

impl fmt::Display for StepRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "Node {} Details: g={} h={} f={}",
            self.node, self.g, self.h, self.f
        )?;
        writeln!(
            f,
            "Open Set: [{}]",
            self.frontier.iter().map(|p| self.number(p)).join(", ")
        )?;
        write!(
            f,
            "Closed Set: [{}]",
            self.visited.iter().map(|p| self.number(p)).join(", ")
        )
    }
}

/// Ordered step records of one run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Trace(pub(crate) Vec<StepRecord>);

impl Trace {
    pub fn iter(&self) -> std::slice::Iter<'_, StepRecord> {
        self.0.iter()
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn last(&self) -> Option<&StepRecord> {
        self.0.last()
    }
    /// Cells in the order they were expanded.
    pub fn expansion_order(&self) -> Vec<Point> {
        self.0
            .iter()
            .filter(|record| record.kind == StepKind::Expanded)
            .map(|record| record.current)
            .collect()
    }
    pub fn into_inner(self) -> Vec<StepRecord> {
        self.0
    }
}

impl Index<usize> for Trace {
    type Output = StepRecord;

    fn index(&self, ix: usize) -> &StepRecord {
        &self.0[ix]
    }
}

impl IntoIterator for Trace {
    type Item = StepRecord;
    type IntoIter = std::vec::IntoIter<StepRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a StepRecord;
    type IntoIter = std::slice::Iter<'a, StepRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, record) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
                writeln!(f)?;
            }
            write!(f, "{}", record)?;
        }
        Ok(())
    }
}
