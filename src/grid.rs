use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MazeError;

pub const WALL_GLYPH: char = '#';
pub const OPEN_GLYPH: char = ' ';

/// Upper bound on rows * cols
pub const MAX_CELLS: usize = 1 << 26;

/// Agent identifier, rendered as a single character on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
    /// 'P'
    #[serde(rename = "P")]
    Pursuer,
    /// 'O'
    #[serde(rename = "O")]
    Target,
}

impl Tag {
    pub fn glyph(self) -> char {
        match self {
            Tag::Pursuer => 'P',
            Tag::Target => 'O',
        }
    }

    pub fn from_glyph(c: char) -> Option<Tag> {
        match c {
            'P' => Some(Tag::Pursuer),
            'O' => Some(Tag::Target),
            _ => None,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

impl FromStr for Tag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next().and_then(Tag::from_glyph), chars.next()) {
            (Some(tag), None) => Ok(tag),
            _ => Err(format!("unknown tag '{}' (expected P or O)", s)),
        }
    }
}

/// Cell contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Wall,
    Open,
    Agent(Tag),
}

impl Cell {
    pub fn glyph(self) -> char {
        match self {
            Cell::Wall => WALL_GLYPH,
            Cell::Open => OPEN_GLYPH,
            Cell::Agent(tag) => tag.glyph(),
        }
    }

    pub fn from_glyph(c: char) -> Option<Cell> {
        match c {
            WALL_GLYPH => Some(Cell::Wall),
            OPEN_GLYPH => Some(Cell::Open),
            _ => Tag::from_glyph(c).map(Cell::Agent),
        }
    }
}

/// A position on the grid (x = column, y = row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Position {
        Position::new(self.x + dx, self.y + dy)
    }

    /// The four orthogonal neighbors in enumeration order: up, down, left, right
    pub fn neighbors4(&self) -> [Position; 4] {
        Direction::ALL.map(|dir| {
            let (dx, dy) = dir.delta();
            self.offset(dx, dy)
        })
    }

    /// Manhattan distance, ignoring obstacles
    pub fn manhattan(&self, other: &Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Move enumeration order. Tie-breaks in move selection depend on it.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Rectangular character grid.
/// Dimensions are fixed at construction; moves produce new grids instead of mutating.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: i32,
    cols: i32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Number of cells for `rows` x `cols`, rejecting sizes above MAX_CELLS
    pub fn checked_size(rows: i32, cols: i32) -> Result<usize, MazeError> {
        let too_large = MazeError::GridTooLarge { rows, cols, max_cells: MAX_CELLS };
        let rows = usize::try_from(rows.max(0)).map_err(|_| too_large.clone())?;
        let cols = usize::try_from(cols.max(0)).map_err(|_| too_large.clone())?;
        rows.checked_mul(cols)
            .filter(|&n| n <= MAX_CELLS)
            .ok_or(too_large)
    }

    /// Create a grid with every cell set to `cell`
    pub fn filled(rows: i32, cols: i32, cell: Cell) -> Result<Self, MazeError> {
        let size = Self::checked_size(rows, cols)?;
        Ok(Grid {
            rows: rows.max(0),
            cols: cols.max(0),
            cells: vec![cell; size],
        })
    }

    /// Create an open rectangle enclosed by a one-cell wall border
    pub fn bordered(rows: i32, cols: i32) -> Result<Self, MazeError> {
        let mut grid = Self::filled(rows, cols, Cell::Open)?;
        for y in 0..grid.rows {
            for x in 0..grid.cols {
                if x == 0 || y == 0 || x == grid.cols - 1 || y == grid.rows - 1 {
                    grid.set_cell(Position::new(x, y), Cell::Wall);
                }
            }
        }
        Ok(grid)
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.cols && pos.y >= 0 && pos.y < self.rows
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Convert in-bounds (x, y) coordinates to cell ID
    pub fn get_id(&self, pos: Position) -> usize {
        pos.x as usize + pos.y as usize * self.cols as usize
    }

    /// Convert cell ID to (x, y) coordinates
    pub fn get_coords(&self, id: usize) -> Position {
        let cols = self.cols as usize;
        Position::new((id % cols) as i32, (id / cols) as i32)
    }

    /// Cell at `pos`, or None when out of bounds
    pub fn get_cell(&self, pos: Position) -> Option<Cell> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some(self.cells[self.get_id(pos)])
    }

    /// Out-of-bounds writes are ignored
    pub(crate) fn set_cell(&mut self, pos: Position, cell: Cell) {
        if self.in_bounds(pos) {
            let id = self.get_id(pos);
            self.cells[id] = cell;
        }
    }

    pub fn is_wall(&self, pos: Position) -> bool {
        matches!(self.get_cell(pos), None | Some(Cell::Wall))
    }

    /// True iff `pos` is in bounds and holds neither a wall nor an agent
    pub fn is_open(&self, pos: Position) -> bool {
        self.get_cell(pos) == Some(Cell::Open)
    }

    pub fn is_border(&self, pos: Position) -> bool {
        pos.x == 0 || pos.y == 0 || pos.x == self.cols - 1 || pos.y == self.rows - 1
    }

    /// All positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.cells.len()).map(move |id| self.get_coords(id))
    }

    pub fn open_cells(&self) -> Vec<Position> {
        self.positions().filter(|&pos| self.is_open(pos)).collect()
    }

    /// First cell holding `tag`, scanning rows top to bottom
    pub fn locate(&self, tag: Tag) -> Option<Position> {
        self.cells
            .iter()
            .position(|&cell| cell == Cell::Agent(tag))
            .map(|id| self.get_coords(id))
    }

    pub fn require(&self, tag: Tag) -> Result<Position, MazeError> {
        self.locate(tag).ok_or(MazeError::CharacterNotFound(tag.glyph()))
    }

    /// Return a copy with `tag` moved from `from` to the open cell `to`
    pub fn apply_move(&self, tag: Tag, from: Position, to: Position) -> Result<Grid, MazeError> {
        if self.get_cell(from) != Some(Cell::Agent(tag)) || !self.is_open(to) {
            return Err(MazeError::InvalidMove { tag: tag.glyph(), from, to });
        }

        let mut next = self.clone();
        next.set_cell(from, Cell::Open);
        next.set_cell(to, Cell::Agent(tag));
        Ok(next)
    }

    /// Return a copy with `tag` written onto the open cell `at`
    pub fn with_agent(&self, tag: Tag, at: Position) -> Result<Grid, MazeError> {
        if !self.is_open(at) {
            return Err(MazeError::InvalidMove { tag: tag.glyph(), from: at, to: at });
        }
        let mut next = self.clone();
        next.set_cell(at, Cell::Agent(tag));
        Ok(next)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.cells.chunks(self.cols.max(1) as usize).enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.glyph())?;
            }
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = MazeError;

    /// Rows separated by '\n' or "\r\n", one glyph per cell. One trailing line break
    /// is tolerated.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.strip_suffix('\n').unwrap_or(text);
        let text = text.strip_suffix('\r').unwrap_or(text);
        if text.is_empty() {
            return Err(MazeError::InvalidDimensions { rows: 0, cols: 0, min_rows: 1, min_cols: 1 });
        }

        let mut cells = Vec::new();
        let mut cols = 0;
        let mut rows = 0;
        for (y, line) in text.split('\n').enumerate() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            let y = y as i32;
            let mut width = 0;
            for (x, glyph) in line.chars().enumerate() {
                let cell = Cell::from_glyph(glyph)
                    .ok_or(MazeError::UnknownGlyph { glyph, x: x as i32, y })?;
                cells.push(cell);
                width += 1;
            }
            if y == 0 {
                cols = width;
            } else if width != cols {
                return Err(MazeError::RaggedRow { row: y, expected: cols, found: width });
            }
            rows += 1;
            if cells.len() > MAX_CELLS {
                return Err(MazeError::GridTooLarge { rows, cols, max_cells: MAX_CELLS });
            }
        }

        if cols == 0 {
            return Err(MazeError::InvalidDimensions { rows, cols, min_rows: 1, min_cols: 1 });
        }

        Ok(Grid { rows, cols, cells })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors_order() {
        let p = Position::new(2, 2);
        assert_eq!(
            p.neighbors4(),
            [Position::new(2, 1), Position::new(2, 3), Position::new(1, 2), Position::new(3, 2)]
        );
    }

    #[test]
    fn test_locate_scans_rows_in_order() {
        let grid: Grid = "#####\n#O  #\n# P #\n#####".parse().unwrap();
        assert_eq!(grid.locate(Tag::Target), Some(Position::new(1, 1)));
        assert_eq!(grid.locate(Tag::Pursuer), Some(Position::new(2, 2)));
    }

    #[test]
    fn test_locate_missing_tag() {
        let grid = Grid::bordered(4, 4).unwrap();
        assert_eq!(grid.locate(Tag::Pursuer), None);
        assert_eq!(grid.require(Tag::Pursuer), Err(MazeError::CharacterNotFound('P')));
    }

    #[test]
    fn test_is_open() {
        let grid: Grid = "####\n#PO#\n#  #\n####".parse().unwrap();
        assert!(grid.is_open(Position::new(1, 2)));
        assert!(!grid.is_open(Position::new(0, 0)));
        assert!(!grid.is_open(Position::new(1, 1)));
        assert!(!grid.is_open(Position::new(2, 1)));
        assert!(!grid.is_open(Position::new(-1, 2)));
        assert!(!grid.is_open(Position::new(4, 2)));
    }

    #[test]
    fn test_apply_move_leaves_input_untouched() {
        let grid: Grid = "####\n#P #\n#  #\n####".parse().unwrap();
        let moved = grid.apply_move(Tag::Pursuer, Position::new(1, 1), Position::new(2, 1)).unwrap();

        assert_eq!(moved.to_string(), "####\n# P#\n#  #\n####");
        assert_eq!(grid.to_string(), "####\n#P #\n#  #\n####");
    }

    #[test]
    fn test_apply_move_rejects_inconsistent_moves() {
        let grid: Grid = "####\n#PO#\n#  #\n####".parse().unwrap();
        let p = Position::new(1, 1);

        // destination occupied by the other agent
        assert!(matches!(
            grid.apply_move(Tag::Pursuer, p, Position::new(2, 1)),
            Err(MazeError::InvalidMove { .. })
        ));
        // wall
        assert!(grid.apply_move(Tag::Pursuer, p, Position::new(0, 1)).is_err());
        // source does not hold the tag
        assert!(grid.apply_move(Tag::Target, p, Position::new(1, 2)).is_err());
    }

    #[test]
    fn test_parse_rejects_bad_text() {
        assert_eq!(
            "###\n#x#\n###".parse::<Grid>(),
            Err(MazeError::UnknownGlyph { glyph: 'x', x: 1, y: 1 })
        );
        assert_eq!(
            "###\n##\n###".parse::<Grid>(),
            Err(MazeError::RaggedRow { row: 1, expected: 3, found: 2 })
        );
        assert!("".parse::<Grid>().is_err());
    }

    #[test]
    fn test_parse_trailing_newline() {
        let grid: Grid = "###\n# #\n###\n".parse().unwrap();
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.to_string(), "###\n# #\n###");
    }

    #[test]
    fn test_parse_crlf_line_breaks() {
        let grid: Grid = "####\r\n#PO#\r\n####\r\n".parse().unwrap();
        assert_eq!(grid.cols(), 4);
        assert_eq!(grid.locate(Tag::Target), Some(Position::new(2, 1)));
        assert_eq!(grid.to_string(), "####\n#PO#\n####");
    }

    #[test]
    fn test_size_limit() {
        assert_eq!(Grid::checked_size(3, 4), Ok(12));
        assert!(Grid::checked_size(50_000, 50_000).is_err());
        assert!(Grid::filled(i32::MAX, 2, Cell::Wall).is_err());
    }

    #[test]
    fn test_tag_from_str() {
        assert_eq!("P".parse::<Tag>(), Ok(Tag::Pursuer));
        assert_eq!("O".parse::<Tag>(), Ok(Tag::Target));
        assert!("PO".parse::<Tag>().is_err());
        assert!("#".parse::<Tag>().is_err());
    }
}
