//! Text-in, text-out entry points.
//!
//! Grids cross this boundary as rows joined by '\n' using the glyphs `#`, ` `, `P`
//! and `O`. Callers hold the current grid text and thread it through successive calls.

use rand::Rng;

use crate::error::MazeError;
use crate::grid::{Grid, Tag};
use crate::maze;
use crate::pursuit::{self, Metric};

/// Generate an empty perfect maze
pub fn generate_maze<R: Rng + ?Sized>(rows: i32, cols: i32, rng: &mut R) -> Result<String, MazeError> {
    Ok(maze::generate_maze(rows, cols, rng)?.to_string())
}

/// Place 'P' and 'O' on two random open cells of `maze_text`
pub fn place_players<R: Rng + ?Sized>(maze_text: &str, rng: &mut R) -> Result<String, MazeError> {
    let grid: Grid = maze_text.parse()?;
    Ok(maze::place_agents(&grid, rng)?.to_string())
}

/// Generate a maze and place both players on it
pub fn generate_maze_with_players<R: Rng + ?Sized>(
    rows: i32,
    cols: i32,
    rng: &mut R,
) -> Result<String, MazeError> {
    let grid = maze::generate_maze(rows, cols, rng)?;
    Ok(maze::place_agents(&grid, rng)?.to_string())
}

/// Walled rectangle with an open interior and both players placed
pub fn generate_arena<R: Rng + ?Sized>(rows: i32, cols: i32, rng: &mut R) -> Result<String, MazeError> {
    let grid = maze::generate_open_rectangle(rows, cols)?;
    Ok(maze::place_agents(&grid, rng)?.to_string())
}

/// Advance `mover` one cell toward `target`
pub fn step(grid_text: &str, mover: Tag, target: Tag, metric: Metric) -> Result<String, MazeError> {
    let grid: Grid = grid_text.parse()?;
    Ok(pursuit::select_move(&grid, mover, target, metric)?.to_string())
}
