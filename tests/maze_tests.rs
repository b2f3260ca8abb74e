mod common;

use common::{count_components, count_edges, lattice_size, open_border_cells, passable_cells, visualize};
use mazechase::maze::{generate_maze, place_agents};
use mazechase::{Grid, Position, Tag};
use rand::rngs::StdRng;
use rand::SeedableRng;

const SIZES: [(i32, i32); 8] = [(5, 5), (5, 9), (6, 6), (7, 12), (10, 10), (11, 11), (21, 31), (40, 17)];

fn mazes() -> impl Iterator<Item = (i32, i32, u64, Grid)> {
    SIZES.into_iter().flat_map(|(rows, cols)| {
        (0..10u64).map(move |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let grid = generate_maze(rows, cols, &mut rng).unwrap();
            (rows, cols, seed, grid)
        })
    })
}

#[test]
fn test_maze_dimensions() {
    for (rows, cols, _, grid) in mazes() {
        assert_eq!(grid.rows(), rows);
        assert_eq!(grid.cols(), cols);
    }
}

#[test]
fn test_border_stays_wall() {
    for (rows, cols, seed, grid) in mazes() {
        assert!(
            open_border_cells(&grid).is_empty(),
            "{}x{} seed {} carved the border:\n{}",
            rows, cols, seed, visualize(&grid)
        );
    }
}

#[test]
fn test_maze_is_connected() {
    for (rows, cols, seed, grid) in mazes() {
        assert_eq!(
            count_components(&grid),
            1,
            "{}x{} seed {} is not connected:\n{}",
            rows, cols, seed, visualize(&grid)
        );
    }
}

#[test]
fn test_maze_has_no_cycles() {
    // A connected graph is a tree iff it has exactly one edge fewer than nodes
    for (rows, cols, seed, grid) in mazes() {
        let nodes = passable_cells(&grid).len();
        assert_eq!(
            count_edges(&grid),
            nodes - 1,
            "{}x{} seed {} has a cycle:\n{}",
            rows, cols, seed, visualize(&grid)
        );
    }
}

#[test]
fn test_every_lattice_cell_is_carved() {
    // Spanning tree over the lattice: n nodes plus n - 1 connecting cells
    for (rows, cols, seed, grid) in mazes() {
        let lattice = lattice_size(rows, cols);
        assert_eq!(grid.open_cells().len(), 2 * lattice - 1, "{}x{} seed {}", rows, cols, seed);

        for y in (1..rows - 1).step_by(2) {
            for x in (1..cols - 1).step_by(2) {
                assert!(grid.is_open(Position::new(x, y)), "lattice cell ({},{}) still wall", x, y);
            }
        }
    }
}

#[test]
fn test_seeds_produce_different_mazes() {
    let a = generate_maze(21, 21, &mut StdRng::seed_from_u64(1)).unwrap();
    let b = generate_maze(21, 21, &mut StdRng::seed_from_u64(2)).unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_large_maze_does_not_overflow() {
    let mut rng = StdRng::seed_from_u64(2024);
    let grid = generate_maze(401, 401, &mut rng).unwrap();
    assert_eq!(grid.open_cells().len(), 2 * lattice_size(401, 401) - 1);
}

#[test]
fn test_placement_keeps_maze_intact() {
    for (rows, cols, seed, maze) in mazes() {
        let mut rng = StdRng::seed_from_u64(seed + 100);
        let placed = place_agents(&maze, &mut rng).unwrap();

        let p = placed.locate(Tag::Pursuer).expect("P placed");
        let o = placed.locate(Tag::Target).expect("O placed");
        assert_ne!(p, o, "{}x{} seed {}", rows, cols, seed);

        // Same walls, two fewer open cells
        assert_eq!(passable_cells(&placed), passable_cells(&maze));
        assert_eq!(placed.open_cells().len() + 2, maze.open_cells().len());
    }
}
