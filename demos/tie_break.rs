use astar_trace::heuristic::Manhattan;
use astar_trace::search::{PathSearch, SearchConfig, TieBreak};
use astar_trace::search_grid::SearchGrid;
use astar_trace::Point;

// On an open grid many cells share the same f, so the tie-break alone decides the order of
// expansion and which of the equally short paths is returned.

fn main() {
    let start = Point::new(0, 0);
    let goal = Point::new(4, 4);
    for tie_break in [TieBreak::FirstInserted, TieBreak::LastInserted] {
        let mut grid = SearchGrid::new(5);
        let config = SearchConfig {
            tie_break,
            ..SearchConfig::default()
        };
        let outcome = PathSearch::with_config(Manhattan, config)
            .run(&mut grid, start, goal)
            .unwrap();
        println!("{:?}", tie_break);
        println!("  expanded: {:?}", outcome.trace().expansion_order());
        println!("  path:     {:?}", outcome.path().unwrap());
    }
}
