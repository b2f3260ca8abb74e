pub mod action_log;
pub mod api;
pub mod config;
pub mod error;
pub mod grid;
pub mod maze;
pub mod pathfinding;
pub mod pursuit;

pub use error::MazeError;
pub use grid::{Cell, Grid, Position, Tag};
pub use pathfinding::path_distance;
pub use pursuit::{select_move, Metric};
