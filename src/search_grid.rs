use crate::cell::Cell;
use crate::error::ParseGridError;
use crate::DEFAULT_GRID_SIZE;
use core::fmt;
use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;
use std::str::FromStr;

/// [SearchGrid] is a square arena of [Cell]s addressed by cell number `y * size + x`. Besides the
/// per-cell search state it maintains information about 4-connected components using a
/// [UnionFind] structure, which allows answering reachability queries without searching.
#[derive(Clone, Debug)]
pub struct SearchGrid {
    size: usize,
    cells: Vec<Cell>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl Default for SearchGrid {
    fn default() -> SearchGrid {
        SearchGrid::new(DEFAULT_GRID_SIZE)
    }
}

impl SearchGrid {
    /// Creates a `size` by `size` grid with all cells free and all costs zeroed.
    pub fn new(size: usize) -> SearchGrid {
        let mut grid = SearchGrid {
            size,
            cells: vec![Cell::default(); size * size],
            components: UnionFind::new(size * size),
            components_dirty: false,
        };
        grid.generate_components();
        grid
    }

    /// Parses a grid drawn with `#` for walls and `.` for free cells, where `S` and `G` mark
    /// the start and the goal. Every row must be as long as there are rows.
    pub fn parse_scenario(
        layout: &str,
    ) -> Result<(SearchGrid, Option<Point>, Option<Point>), ParseGridError> {
        let rows = layout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<&str>>();
        if rows.is_empty() {
            return Err(ParseGridError::Empty);
        }
        let size = rows.len();
        let mut grid = SearchGrid::new(size);
        let (mut start, mut goal) = (None, None);
        for (y, row) in rows.iter().enumerate() {
            let width = row.chars().count();
            if width != size {
                return Err(ParseGridError::NotSquare {
                    row: y,
                    width,
                    expected: size,
                });
            }
            for (x, c) in row.chars().enumerate() {
                let point = Point::new(x as i32, y as i32);
                match c {
                    '#' => grid.set_wall(point.x, point.y, true),
                    '.' => {}
                    'S' | 'G' => {
                        let marker = if c == 'S' { &mut start } else { &mut goal };
                        if marker.replace(point).is_some() {
                            return Err(ParseGridError::DuplicateMarker { symbol: c, x, y });
                        }
                    }
                    other => {
                        return Err(ParseGridError::UnknownSymbol {
                            symbol: other,
                            x,
                            y,
                        })
                    }
                }
            }
        }
        grid.update();
        Ok((grid, start, goal))
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells in the grid.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn in_bounds(&self, point: &Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.size
            && (point.y as usize) < self.size
    }

    /// The cell number of a point, which doubles as its index in the arena.
    pub fn index(&self, point: &Point) -> Option<usize> {
        if self.in_bounds(point) {
            Some(point.y as usize * self.size + point.x as usize)
        } else {
            None
        }
    }

    pub fn point(&self, ix: usize) -> Point {
        Point::new((ix % self.size) as i32, (ix / self.size) as i32)
    }

    pub fn cell(&self, point: &Point) -> Option<&Cell> {
        self.index(point).map(|ix| &self.cells[ix])
    }

    pub(crate) fn cell_at(&self, ix: usize) -> &Cell {
        &self.cells[ix]
    }

    pub(crate) fn cell_at_mut(&mut self, ix: usize) -> &mut Cell {
        &mut self.cells[ix]
    }

    /// Out of bounds positions count as walls.
    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        self.cell(&Point::new(x, y)).map_or(true, |cell| cell.is_wall)
    }

    /// Places or removes a wall. Joins newly connected components and flags the components
    /// as dirty if they are (potentially) broken apart into multiple. Out of bounds positions
    /// are ignored.
    pub fn set_wall(&mut self, x: i32, y: i32, blocked: bool) {
        let p = Point::new(x, y);
        let Some(ix) = self.index(&p) else {
            return;
        };
        if blocked {
            if !self.cells[ix].is_wall {
                self.components_dirty = true;
            }
        } else {
            for n in self.passable_neighbours(&p) {
                if let Some(n_ix) = self.index(&n) {
                    self.components.union(ix, n_ix);
                }
            }
        }
        self.cells[ix].is_wall = blocked;
    }

    /// Flips the wall flag of a cell and returns the new value.
    pub fn toggle_wall(&mut self, x: i32, y: i32) -> bool {
        let blocked = !self.is_wall(x, y);
        self.set_wall(x, y, blocked);
        blocked
    }

    /// In-bounds orthogonal neighbours in the order left, up, right, down.
    pub fn neighbours(&self, point: &Point) -> SmallVec<[Point; 4]> {
        [
            Point::new(point.x - 1, point.y),
            Point::new(point.x, point.y - 1),
            Point::new(point.x + 1, point.y),
            Point::new(point.x, point.y + 1),
        ]
        .into_iter()
        .filter(|p| self.in_bounds(p))
        .collect()
    }

    /// Like [neighbours](Self::neighbours) but without walls.
    pub fn passable_neighbours(&self, point: &Point) -> SmallVec<[Point; 4]> {
        self.neighbours(point)
            .into_iter()
            .filter(|p| !self.is_wall(p.x, p.y))
            .collect()
    }

    /// Returns every cell to its freshly constructed state: no walls, zeroed costs, no parents.
    pub fn reset(&mut self) {
        self.cells.iter_mut().for_each(Cell::reset);
        self.generate_components();
    }

    /// Zeroes costs and parent links while keeping the walls in place.
    pub fn clear_search_state(&mut self) {
        self.cells.iter_mut().for_each(Cell::clear_costs);
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> Option<usize> {
        self.index(point).map(|ix| self.components.find(ix))
    }

    /// Checks if start and goal are on the same component. The components must be up to date,
    /// see [update](Self::update).
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        match (self.index(start), self.index(goal)) {
            (Some(start_ix), Some(goal_ix)) => {
                !self.cells[start_ix].is_wall
                    && !self.cells[goal_ix].is_wall
                    && self.components.equiv(start_ix, goal_ix)
            }
            _ => false,
        }
    }

    /// Checks if start and goal are not on the same component.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        !self.reachable(start, goal)
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up free grid neighbours to the same
    /// components. Only the right and lower neighbour need to be visited per cell.
    pub fn generate_components(&mut self) {
        let n = self.size;
        self.components = UnionFind::new(n * n);
        self.components_dirty = false;
        for ix in 0..n * n {
            if self.cells[ix].is_wall {
                continue;
            }
            let point = self.point(ix);
            for p in [
                Point::new(point.x + 1, point.y),
                Point::new(point.x, point.y + 1),
            ] {
                if let Some(n_ix) = self.index(&p) {
                    if !self.cells[n_ix].is_wall {
                        self.components.union(ix, n_ix);
                    }
                }
            }
        }
    }
}

impl fmt::Display for SearchGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.size.max(1)) {
            let line = row
                .iter()
                .map(|cell| if cell.is_wall { '#' } else { '.' })
                .collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl FromStr for SearchGrid {
    type Err = ParseGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SearchGrid::parse_scenario(s).map(|(grid, _, _)| grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests whether points are correctly mapped to different connected components
    #[test]
    fn test_component_generation() {
        // Corresponds to the following 3x3 grid:
        //  ___
        // |.#.|
        // |.#.|
        // |...|
        //  ___
        let mut grid = SearchGrid::new(3);
        grid.set_wall(1, 0, true);
        grid.set_wall(1, 1, true);
        grid.update();
        let p1 = Point::new(0, 0);
        let p2 = Point::new(2, 0);
        assert!(grid.reachable(&p1, &p2));
        grid.set_wall(1, 2, true);
        assert!(grid.components_dirty);
        grid.update();
        assert!(grid.unreachable(&p1, &p2));
        assert!(grid.reachable(&p1, &Point::new(0, 2)));
    }

    #[test]
    fn removing_wall_joins_components() {
        let (mut grid, start, goal) = SearchGrid::parse_scenario(
            "S#.
             ##.
             ..G",
        )
        .unwrap();
        let (start, goal) = (start.unwrap(), goal.unwrap());
        assert!(grid.unreachable(&start, &goal));
        grid.set_wall(1, 0, false);
        assert!(!grid.components_dirty);
        assert!(grid.reachable(&start, &goal));
    }

    #[test]
    fn diagonal_is_not_connected() {
        //  __
        // |.#|
        // |#.|
        //  __
        let grid: SearchGrid = ".#\n#.".parse().unwrap();
        assert!(grid.unreachable(&Point::new(0, 0), &Point::new(1, 1)));
    }

    #[test]
    fn neighbour_order_and_bounds() {
        let grid = SearchGrid::new(3);
        let corner = grid.neighbours(&Point::new(0, 0));
        assert_eq!(corner.as_slice(), &[Point::new(1, 0), Point::new(0, 1)]);
        let centre = grid.neighbours(&Point::new(1, 1));
        assert_eq!(
            centre.as_slice(),
            &[
                Point::new(0, 1),
                Point::new(1, 0),
                Point::new(2, 1),
                Point::new(1, 2)
            ]
        );
    }

    #[test]
    fn cell_numbers() {
        let grid = SearchGrid::default();
        assert_eq!(grid.size(), 10);
        assert_eq!(grid.index(&Point::new(3, 2)), Some(23));
        assert_eq!(grid.point(23), Point::new(3, 2));
        assert_eq!(grid.index(&Point::new(10, 0)), None);
        assert_eq!(grid.index(&Point::new(-1, 0)), None);
    }

    #[test]
    fn toggle_and_reset() {
        let mut grid = SearchGrid::new(4);
        assert!(grid.toggle_wall(2, 2));
        assert!(grid.is_wall(2, 2));
        assert!(!grid.toggle_wall(2, 2));
        grid.set_wall(1, 1, true);
        grid.reset();
        assert!(!grid.is_wall(1, 1));
        assert!(grid.is_wall(-1, 0));
    }

    #[test]
    fn display_round_trip() {
        let layout = "..#\n.#.\n...\n";
        let grid: SearchGrid = layout.parse().unwrap();
        assert_eq!(grid.to_string(), layout);
    }

    #[test]
    fn parse_errors() {
        assert_eq!("".parse::<SearchGrid>().unwrap_err(), ParseGridError::Empty);
        assert!(matches!(
            "..\n...".parse::<SearchGrid>(),
            Err(ParseGridError::NotSquare { row: 1, .. })
        ));
        assert!(matches!(
            ".x\n..".parse::<SearchGrid>(),
            Err(ParseGridError::UnknownSymbol { symbol: 'x', .. })
        ));
        assert_eq!(
            SearchGrid::parse_scenario("S.S\n...\n..G").unwrap_err(),
            ParseGridError::DuplicateMarker {
                symbol: 'S',
                x: 2,
                y: 0
            }
        );
        assert!(matches!(
            SearchGrid::parse_scenario("G..\n...\nS.G"),
            Err(ParseGridError::DuplicateMarker { symbol: 'G', .. })
        ));
    }
}
