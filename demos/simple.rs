use astar_trace::heuristic::Manhattan;
use astar_trace::search_grid::SearchGrid;
use astar_trace::Point;

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Every expansion is printed the way a front end would show it, followed by the path.

fn main() {
    let mut grid = SearchGrid::new(3);
    grid.set_wall(1, 1, true);
    println!("{}", grid);
    let start = Point::new(0, 0);
    let end = Point::new(2, 2);
    let outcome = astar_trace::run(&mut grid, start, end, Manhattan).unwrap();
    println!("{}\n", outcome.trace());
    println!("Path:");
    for record in outcome.path_records(&grid) {
        println!("{:?} (node {}, g={})", record.current, record.node, record.g);
    }
}
