use thiserror::Error;

use crate::grid::Position;

/// Errors reported by grid, maze and pursuit operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("Invalid grid dimensions {rows}x{cols} (minimum {min_rows}x{min_cols})")]
    InvalidDimensions {
        rows: i32,
        cols: i32,
        min_rows: i32,
        min_cols: i32,
    },
    #[error("Grid {rows}x{cols} exceeds {max_cells} cells")]
    GridTooLarge { rows: i32, cols: i32, max_cells: usize },
    #[error("Character '{0}' not found in the grid")]
    CharacterNotFound(char),
    #[error("Not enough open cells to place players (found {found}, need 2)")]
    InsufficientOpenSpace { found: usize },
    #[error("Invalid move of '{tag}' from {from} to {to}")]
    InvalidMove { tag: char, from: Position, to: Position },
    #[error("'{0}' has no legal move")]
    NoLegalMove(char),
    #[error("No open path from {from} to {to}")]
    Unreachable { from: Position, to: Position },
    #[error("Unknown glyph {glyph:?} at {x},{y}")]
    UnknownGlyph { glyph: char, x: i32, y: i32 },
    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRow { row: i32, expected: i32, found: i32 },
}
