#![allow(dead_code)]

use mazechase::{Grid, Position};
use std::collections::VecDeque;

/// Build a grid from string rows
pub fn grid_from_rows(rows: &[&str]) -> Grid {
    rows.join("\n")
        .parse()
        .unwrap_or_else(|e| panic!("bad test grid: {}", e))
}

/// Cells that are not walls (open or holding an agent)
pub fn passable_cells(grid: &Grid) -> Vec<Position> {
    grid.positions().filter(|&pos| !grid.is_wall(pos)).collect()
}

/// Number of connected components among passable cells
pub fn count_components(grid: &Grid) -> usize {
    let cells = passable_cells(grid);
    let mut seen = vec![false; grid.len()];
    let mut components = 0;

    for start in cells {
        if seen[grid.get_id(start)] {
            continue;
        }
        components += 1;
        seen[grid.get_id(start)] = true;
        let mut queue = VecDeque::from([start]);
        while let Some(pos) = queue.pop_front() {
            for next in pos.neighbors4() {
                if grid.is_wall(next) || seen[grid.get_id(next)] {
                    continue;
                }
                seen[grid.get_id(next)] = true;
                queue.push_back(next);
            }
        }
    }

    components
}

/// Number of orthogonally adjacent passable pairs
pub fn count_edges(grid: &Grid) -> usize {
    passable_cells(grid)
        .iter()
        .map(|pos| {
            [pos.offset(1, 0), pos.offset(0, 1)]
                .iter()
                .filter(|&&next| !grid.is_wall(next))
                .count()
        })
        .sum()
}

/// Border cells that are not walls
pub fn open_border_cells(grid: &Grid) -> Vec<Position> {
    grid.positions()
        .filter(|&pos| grid.is_border(pos) && !grid.is_wall(pos))
        .collect()
}

/// Number of odd-row, odd-column cells strictly inside the border
pub fn lattice_size(rows: i32, cols: i32) -> usize {
    (((rows - 1) / 2) * ((cols - 1) / 2)) as usize
}

/// Render a grid with row numbers for assertion messages
pub fn visualize(grid: &Grid) -> String {
    grid.to_string()
        .split('\n')
        .enumerate()
        .map(|(y, row)| format!("{:3} |{}|", y, row))
        .collect::<Vec<_>>()
        .join("\n")
}
