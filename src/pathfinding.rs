use std::collections::VecDeque;

use crate::error::MazeError;
use crate::grid::{Grid, Position, Tag};

/// Shortest open-path distance from `from` to `to`, or None when unreachable.
///
/// Breadth-first search over open cells in 4 directions. The `to` cell is traversable
/// even when it holds an agent, so a pursuer can path onto its target; `from` is the
/// search root whatever it holds. Walls and out-of-bounds cells are impassable, also
/// as a destination.
pub fn path_distance(grid: &Grid, from: Position, to: Position) -> Option<u32> {
    if !grid.in_bounds(from) || !grid.in_bounds(to) {
        return None;
    }
    if from == to {
        return Some(0);
    }
    if grid.is_wall(to) {
        return None;
    }

    let mut dist: Vec<Option<u32>> = vec![None; grid.len()];
    let mut queue = VecDeque::new();
    dist[grid.get_id(from)] = Some(0);
    queue.push_back(from);

    while let Some(pos) = queue.pop_front() {
        let base = dist[grid.get_id(pos)].unwrap_or(0);
        for next in pos.neighbors4() {
            if next != to && !grid.is_open(next) {
                continue;
            }
            let id = grid.get_id(next);
            if dist[id].is_some() {
                continue;
            }
            if next == to {
                return Some(base + 1);
            }
            dist[id] = Some(base + 1);
            queue.push_back(next);
        }
    }

    None
}

/// Manhattan distance between the cells holding `a` and `b`
pub fn manhattan_between(grid: &Grid, a: Tag, b: Tag) -> Result<u32, MazeError> {
    let pa = grid.require(a)?;
    let pb = grid.require(b)?;
    Ok(pa.manhattan(&pb))
}

/// Shortest open-path distance between the cells holding `a` and `b`
pub fn path_distance_between(grid: &Grid, a: Tag, b: Tag) -> Result<u32, MazeError> {
    let from = grid.require(a)?;
    let to = grid.require(b)?;
    path_distance(grid, from, to).ok_or(MazeError::Unreachable { from, to })
}

/// Format path distance for display
pub fn format_distance(distance: Option<u32>) -> String {
    match distance {
        Some(d) => d.to_string(),
        None => "unreachable".to_string(),
    }
}
