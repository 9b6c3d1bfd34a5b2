use core::fmt;
use grid_util::point::Point;

/// Which end of the requested path an [EndpointProblem] refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndpointProblem {
    /// No cell was selected.
    Missing,
    OutOfBounds(Point),
    Wall(Point),
    /// Start and goal are the same cell.
    Coincident(Point),
}

/// Error types for path search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchError {
    /// Start or goal cannot be searched from or to. Raised before the search begins.
    InvalidEndpoints(Endpoint, EndpointProblem),

    /// The frontier was exhausted without reaching the goal.
    NotFound,

    /// A path was requested from a run that has not terminated yet.
    Unfinished,

    /// Walking the parent links from the goal did not lead back to the start. This means the
    /// search state was corrupted and is never expected in correct operation.
    BrokenParentChain { at: Point },
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::Goal => write!(f, "goal"),
        }
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::InvalidEndpoints(end, EndpointProblem::Missing) => {
                write!(f, "No {} cell selected", end)
            }
            SearchError::InvalidEndpoints(end, EndpointProblem::OutOfBounds(p)) => {
                write!(f, "The {} cell {} lies outside the grid", end, p)
            }
            SearchError::InvalidEndpoints(end, EndpointProblem::Wall(p)) => {
                write!(f, "The {} cell {} is a wall", end, p)
            }
            SearchError::InvalidEndpoints(_, EndpointProblem::Coincident(p)) => {
                write!(f, "Start and goal are both {}", p)
            }
            SearchError::NotFound => write!(f, "No path found"),
            SearchError::Unfinished => write!(f, "Search has not finished yet"),
            SearchError::BrokenParentChain { at } => {
                write!(f, "Parent chain broken at {}", at)
            }
        }
    }
}

impl std::error::Error for SearchError {}

/// Errors produced when reading a grid from its text form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseGridError {
    Empty,
    NotSquare {
        row: usize,
        width: usize,
        expected: usize,
    },
    UnknownSymbol {
        symbol: char,
        x: usize,
        y: usize,
    },
    /// `S` or `G` appears more than once.
    DuplicateMarker {
        symbol: char,
        x: usize,
        y: usize,
    },
}

impl fmt::Display for ParseGridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseGridError::Empty => write!(f, "Grid layout is empty"),
            ParseGridError::NotSquare {
                row,
                width,
                expected,
            } => write!(f, "Row {} has {} cells, expected {}", row, width, expected),
            ParseGridError::UnknownSymbol { symbol, x, y } => {
                write!(f, "Unknown symbol '{}' at ({}, {})", symbol, x, y)
            }
            ParseGridError::DuplicateMarker { symbol, x, y } => {
                write!(f, "Second '{}' marker at ({}, {})", symbol, x, y)
            }
        }
    }
}

impl std::error::Error for ParseGridError {}
