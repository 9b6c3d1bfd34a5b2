/// A single grid cell together with the bookkeeping A* keeps for it. Cells live in the arena of
/// a [SearchGrid](crate::search_grid::SearchGrid) and refer to their predecessor by arena index,
/// so the parent links form a tree rooted at the start without any shared ownership.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub is_wall: bool,
    /// Cost of the best known path from the start.
    pub g: i32,
    /// Heuristic estimate of the remaining cost to the goal.
    pub h: i32,
    /// Always `g + h` once the cell has been reached.
    pub f: i32,
    pub parent: Option<usize>,
}

impl Cell {
    /// Clears search state and the wall flag.
    pub fn reset(&mut self) {
        *self = Cell::default();
    }

    /// Clears search state but keeps the wall flag.
    pub fn clear_costs(&mut self) {
        *self = Cell {
            is_wall: self.is_wall,
            ..Cell::default()
        };
    }

    /// Records a new best path into this cell.
    pub(crate) fn relax(&mut self, parent: usize, g: i32, h: i32) {
        self.parent = Some(parent);
        self.g = g;
        self.h = h;
        self.f = g.saturating_add(h);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relax_keeps_f_in_sync() {
        let mut cell = Cell::default();
        cell.relax(3, 4, 5);
        assert_eq!(cell.f, 9);
        assert_eq!(cell.parent, Some(3));
    }

    #[test]
    fn relax_saturates_huge_estimates() {
        let mut cell = Cell::default();
        cell.relax(0, 1, i32::MAX);
        assert_eq!(cell.f, i32::MAX);
    }

    #[test]
    fn clear_costs_keeps_walls() {
        let mut cell = Cell {
            is_wall: true,
            g: 2,
            h: 1,
            f: 3,
            parent: Some(0),
        };
        cell.clear_costs();
        assert!(cell.is_wall);
        assert_eq!(cell.f, 0);
        assert!(cell.parent.is_none());
        cell.reset();
        assert_eq!(cell, Cell::default());
    }
}
