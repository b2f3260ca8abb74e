use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::MazeError;
use crate::grid::{Cell, Grid, Position, Tag};

pub const MIN_MAZE_SIZE: i32 = 5;
pub const MIN_ARENA_SIZE: i32 = 3;

/// Two-step carving offsets. Shuffled per cell.
const CARVE_STEPS: [(i32, i32); 4] = [(0, 2), (0, -2), (2, 0), (-2, 0)];

/// One pending cell of the carving walk
struct Frame {
    pos: Position,
    steps: [(i32, i32); 4],
    next: usize,
}

impl Frame {
    fn new<R: Rng + ?Sized>(pos: Position, rng: &mut R) -> Self {
        let mut steps = CARVE_STEPS;
        steps.shuffle(rng);
        Frame { pos, steps, next: 0 }
    }
}

/// Generate a perfect maze by randomized depth-first carving on the odd-index lattice.
///
/// All cells start as walls. Passages are carved two cells at a time so a wall stays
/// between neighboring lattice cells; the carved cells form a spanning tree, so every
/// open cell is connected to every other by exactly one simple path. The border is
/// never carved.
pub fn generate_maze<R: Rng + ?Sized>(rows: i32, cols: i32, rng: &mut R) -> Result<Grid, MazeError> {
    if rows < MIN_MAZE_SIZE || cols < MIN_MAZE_SIZE {
        return Err(MazeError::InvalidDimensions {
            rows,
            cols,
            min_rows: MIN_MAZE_SIZE,
            min_cols: MIN_MAZE_SIZE,
        });
    }

    let mut grid = Grid::filled(rows, cols, Cell::Wall)?;

    // Odd indices strictly inside the border
    let odd_xs: Vec<i32> = (1..cols - 1).step_by(2).collect();
    let odd_ys: Vec<i32> = (1..rows - 1).step_by(2).collect();
    let start = Position::new(random_pick(&odd_xs, rng), random_pick(&odd_ys, rng));
    grid.set_cell(start, Cell::Open);

    // Explicit stack instead of recursion so large mazes cannot overflow
    let mut stack = vec![Frame::new(start, rng)];
    while let Some(frame) = stack.last_mut() {
        if frame.next == frame.steps.len() {
            stack.pop();
            continue;
        }

        let (dx, dy) = frame.steps[frame.next];
        frame.next += 1;
        let here = frame.pos;
        let dest = here.offset(dx, dy);

        if is_interior(&grid, dest) && grid.get_cell(dest) == Some(Cell::Wall) {
            grid.set_cell(here.offset(dx / 2, dy / 2), Cell::Open);
            grid.set_cell(dest, Cell::Open);
            stack.push(Frame::new(dest, rng));
        }
    }

    Ok(grid)
}

/// Open rectangle: border walls, open interior, no agents
pub fn generate_open_rectangle(rows: i32, cols: i32) -> Result<Grid, MazeError> {
    if rows < MIN_ARENA_SIZE || cols < MIN_ARENA_SIZE {
        return Err(MazeError::InvalidDimensions {
            rows,
            cols,
            min_rows: MIN_ARENA_SIZE,
            min_cols: MIN_ARENA_SIZE,
        });
    }
    Grid::bordered(rows, cols)
}

/// Place 'P' and 'O' on two distinct open cells chosen uniformly at random.
/// Agents already on the grid are lifted first, so their cells are candidates too.
pub fn place_agents<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Result<Grid, MazeError> {
    let cleared = without_agents(grid);
    let open = cleared.open_cells();
    if open.len() < 2 {
        return Err(MazeError::InsufficientOpenSpace { found: open.len() });
    }

    let picked: Vec<Position> = open.choose_multiple(rng, 2).copied().collect();
    cleared
        .with_agent(Tag::Pursuer, picked[0])?
        .with_agent(Tag::Target, picked[1])
}

/// Copy of `grid` with every agent cell reopened
fn without_agents(grid: &Grid) -> Grid {
    let mut cleared = grid.clone();
    for pos in grid.positions() {
        if let Some(Cell::Agent(_)) = grid.get_cell(pos) {
            cleared.set_cell(pos, Cell::Open);
        }
    }
    cleared
}

fn is_interior(grid: &Grid, pos: Position) -> bool {
    pos.x > 0 && pos.x < grid.cols() - 1 && pos.y > 0 && pos.y < grid.rows() - 1
}

fn random_pick<R: Rng + ?Sized>(values: &[i32], rng: &mut R) -> i32 {
    values[rng.gen_range(0..values.len())]
}
