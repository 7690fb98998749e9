use core::fmt;
use grid_util::point::Point;

/// The persistent role a cell plays in a search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Role {
    #[default]
    Empty,
    Start,
    End,
}

/// Transient rendering state, rebuilt by every search and cleared on reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VisualTag {
    #[default]
    Unvisited,
    Visited,
    Path,
}

/// Address of a cell on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    pub const fn new(row: usize, col: usize) -> CellPos {
        CellPos { row, col }
    }

    /// Number of 4-directional steps between two cells on an empty grid.
    pub fn manhattan_distance(&self, other: &CellPos) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Columns map to `x` and rows to `y`.
    pub(crate) fn to_point(self) -> Point {
        Point::new(self.col as i32, self.row as i32)
    }

    /// Only valid for points already known to lie on a grid.
    pub(crate) fn from_point(point: &Point) -> CellPos {
        CellPos {
            row: point.y as usize,
            col: point.x as usize,
        }
    }
}

impl From<(usize, usize)> for CellPos {
    fn from((row, col): (usize, usize)) -> Self {
        CellPos { row, col }
    }
}

impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Snapshot of a single cell as handed to renderers. Owned by value so that a
/// sink never holds on to grid storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub pos: CellPos,
    pub role: Role,
    pub obstacle: bool,
    pub tag: VisualTag,
}

impl Cell {
    pub fn row(&self) -> usize {
        self.pos.row
    }
    pub fn col(&self) -> usize {
        self.pos.col
    }
    pub fn is_start(&self) -> bool {
        self.role == Role::Start
    }
    pub fn is_end(&self) -> bool {
        self.role == Role::End
    }

    /// Single character used by the [Display](fmt::Display) impl of the grid.
    pub fn glyph(&self) -> char {
        match (self.role, self.obstacle, self.tag) {
            (Role::Start, _, _) => 'S',
            (Role::End, _, _) => 'E',
            (Role::Empty, true, _) => '#',
            (Role::Empty, false, VisualTag::Path) => '*',
            (Role::Empty, false, VisualTag::Visited) => 'o',
            (Role::Empty, false, VisualTag::Unvisited) => '.',
        }
    }
}
