use astar_trace::heuristic::Manhattan;
use astar_trace::search::{PathSearch, SearchConfig};
use astar_trace::search_grid::SearchGrid;

// The goal is sealed off, so the frontier runs dry. With pruning enabled the connected
// components reveal this before any cell is expanded.

fn main() {
    let (mut grid, start, goal) = SearchGrid::parse_scenario(
        "S.........
         ..........
         ......###.
         ......#G#.
         ......###.
         ..........
         ..........
         ..........
         ..........
         ..........",
    )
    .unwrap();
    let search = PathSearch::new(Manhattan);
    match search.run_selection(&mut grid, start, goal).unwrap().into_path() {
        Ok(path) => println!("Path: {:?}", path),
        Err(e) => println!("{}", e),
    }
    let pruned = PathSearch::with_config(
        search.heuristic,
        SearchConfig {
            prune_unreachable: true,
            ..SearchConfig::default()
        },
    );
    let outcome = pruned.run_selection(&mut grid, start, goal).unwrap();
    println!("Expansions with pruning: {}", outcome.trace().len());
}
