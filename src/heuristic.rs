use crate::EDGE_COST;
use grid_util::point::Point;

/// Estimates the remaining cost between two cells. A* returns shortest paths as long as the
/// estimate never exceeds the true cost; this is assumed, never checked.
pub trait Heuristic {
    fn estimate(&self, from: &Point, to: &Point) -> i32;
}

impl<F> Heuristic for F
where
    F: Fn(&Point, &Point) -> i32,
{
    fn estimate(&self, from: &Point, to: &Point) -> i32 {
        self(from, to)
    }
}

/// Exact cost on an open 4-connected grid.
#[derive(Clone, Copy, Debug, Default)]
pub struct Manhattan;

impl Heuristic for Manhattan {
    fn estimate(&self, from: &Point, to: &Point) -> i32 {
        from.manhattan_distance(to) * EDGE_COST
    }
}

/// Never larger than [Manhattan], so admissible on a 4-grid but less informed.
#[derive(Clone, Copy, Debug, Default)]
pub struct Chebyshev;

impl Heuristic for Chebyshev {
    fn estimate(&self, from: &Point, to: &Point) -> i32 {
        (from.x - to.x).abs().max((from.y - to.y).abs()) * EDGE_COST
    }
}

/// Always zero, which turns the search into Dijkstra's algorithm.
#[derive(Clone, Copy, Debug, Default)]
pub struct Zero;

impl Heuristic for Zero {
    fn estimate(&self, _: &Point, _: &Point) -> i32 {
        0
    }
}

/// Scales another heuristic. Factors above 1 trade optimality for fewer expansions.
#[derive(Clone, Debug)]
pub struct Weighted<H> {
    pub inner: H,
    pub heuristic_factor: f32,
}

impl<H: Heuristic> Weighted<H> {
    pub fn new(inner: H, heuristic_factor: f32) -> Weighted<H> {
        Weighted {
            inner,
            heuristic_factor,
        }
    }
}

impl<H: Heuristic> Heuristic for Weighted<H> {
    /// Just the inner estimate times a heuristic factor.
    fn estimate(&self, from: &Point, to: &Point) -> i32 {
        (self.inner.estimate(from, to) as f32 * self.heuristic_factor) as i32
    }
}
