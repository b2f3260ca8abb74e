use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MazeError;
use crate::grid::{Grid, Position, Tag};
use crate::pathfinding::{format_distance, path_distance};

// Trace logging flag - set to true to print candidate scoring to stderr
const TRACE_PURSUIT: bool = false;

/// Distance used to score candidate moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Straight-line grid distance. Ignores walls, so it can walk into dead ends.
    Manhattan,
    /// Breadth-first shortest path over open cells
    Path,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Manhattan => write!(f, "manhattan"),
            Metric::Path => write!(f, "path"),
        }
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "manhattan" => Ok(Metric::Manhattan),
            "path" | "smart" => Ok(Metric::Path),
            other => Err(format!("unknown metric '{}' (expected manhattan or path)", other)),
        }
    }
}

/// A legal move together with the grid it produces
#[derive(Debug, Clone)]
pub struct Candidate {
    pub to: Position,
    pub grid: Grid,
}

/// Open neighbors of the cell holding `tag`, in up/down/left/right order
pub fn legal_moves(grid: &Grid, tag: Tag) -> Result<Vec<Position>, MazeError> {
    let from = grid.require(tag)?;
    Ok(from
        .neighbors4()
        .into_iter()
        .filter(|&pos| grid.is_open(pos))
        .collect())
}

/// Every grid reachable by one legal move of `tag`, in neighbor order
pub fn successors(grid: &Grid, tag: Tag) -> Result<Vec<Candidate>, MazeError> {
    let from = grid.require(tag)?;
    legal_moves(grid, tag)?
        .into_iter()
        .map(|to| grid.apply_move(tag, from, to).map(|next| Candidate { to, grid: next }))
        .collect()
}

/// Score of a candidate; None means the target cannot be reached from it
pub fn score(candidate: &Candidate, target: Position, metric: Metric) -> Option<u32> {
    match metric {
        Metric::Manhattan => Some(candidate.to.manhattan(&target)),
        Metric::Path => path_distance(&candidate.grid, candidate.to, target),
    }
}

/// Move `mover` one step toward `target` and return the resulting grid.
///
/// The candidate with the lowest score wins; ties go to the earliest candidate in
/// up/down/left/right order. Under the path metric unreachable candidates lose to any
/// reachable one, and if none is reachable the Manhattan distance decides. A move is
/// always made when one is legal, even if every candidate increases the distance.
pub fn select_move(grid: &Grid, mover: Tag, target: Tag, metric: Metric) -> Result<Grid, MazeError> {
    let target_pos = grid.require(target)?;
    let mut candidates = successors(grid, mover)?;
    if candidates.is_empty() {
        return Err(MazeError::NoLegalMove(mover.glyph()));
    }

    let scores: Vec<Option<u32>> = candidates
        .iter()
        .map(|candidate| score(candidate, target_pos, metric))
        .collect();

    if TRACE_PURSUIT {
        eprintln!("[select_move] {} -> {} at {} using {}", mover, target, target_pos, metric);
        for (candidate, score) in candidates.iter().zip(&scores) {
            eprintln!("  candidate {} score {}", candidate.to, format_distance(*score));
        }
    }

    let best = first_minimum(&scores)
        .or_else(|| {
            // Nothing reachable: fall back to straight-line distance
            let fallback: Vec<Option<u32>> = candidates
                .iter()
                .map(|candidate| Some(candidate.to.manhattan(&target_pos)))
                .collect();
            first_minimum(&fallback)
        })
        .ok_or(MazeError::NoLegalMove(mover.glyph()))?;

    let chosen = candidates.swap_remove(best);
    if TRACE_PURSUIT {
        eprintln!("[select_move] chose {}", chosen.to);
    }
    Ok(chosen.grid)
}

/// Index of the first smallest finite score
fn first_minimum(scores: &[Option<u32>]) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for (i, score) in scores.iter().enumerate() {
        if let Some(s) = *score {
            if best.map_or(true, |(_, b)| s < b) {
                best = Some((i, s));
            }
        }
    }
    best.map(|(i, _)| i)
}
