use core::fmt;
use grid_util::grid::{BoolGrid, Grid};
use grid_util::point::Point;
use itertools::iproduct;
use log::{debug, info};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::cell::{Cell, CellPos, Role, VisualTag};
use crate::config::PathfinderConfig;
use crate::error::{ConfigError, InvalidCellError, MissingEndpointsError};

/// Offsets (dx, dy) in the fixed order up, down, left, right. Search traces
/// depend on this order.
const NEUMANN_OFFSETS: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// [PathingGrid] keeps the obstacle layer in a [BoolGrid] (blocked is [true]),
/// the start and end assignment, and a per-cell [VisualTag] layer that is only
/// touched by renderers. Connected components of open cells are tracked in a
/// [UnionFind] so reachability can be checked without searching.
#[derive(Clone, Debug)]
pub struct PathingGrid {
    grid: BoolGrid,
    tags: Vec<VisualTag>,
    rows: usize,
    cols: usize,
    start: Option<Point>,
    end: Option<Point>,
    components: UnionFind<usize>,
    components_dirty: bool,
}

impl PathingGrid {
    /// Creates an all-empty grid.
    ///
    /// # Panics
    /// If either dimension is zero; use [from_config](Self::from_config) to get an error instead.
    pub fn new(rows: usize, cols: usize) -> PathingGrid {
        assert!(rows > 0 && cols > 0, "grid dimensions must be positive");
        let mut pathing_grid = PathingGrid {
            grid: BoolGrid::new(cols, rows, false),
            tags: vec![VisualTag::Unvisited; rows * cols],
            rows,
            cols,
            start: None,
            end: None,
            components: UnionFind::new(rows * cols),
            components_dirty: false,
        };
        pathing_grid.generate_components();
        pathing_grid
    }

    pub fn from_config(config: &PathfinderConfig) -> Result<PathingGrid, ConfigError> {
        config.validate()?;
        Ok(PathingGrid::new(config.rows, config.cols))
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    pub fn start(&self) -> Option<CellPos> {
        self.start.as_ref().map(CellPos::from_point)
    }
    pub fn end(&self) -> Option<CellPos> {
        self.end.as_ref().map(CellPos::from_point)
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.cols && (y as usize) < self.rows
    }
    fn get_ix_point(&self, point: &Point) -> usize {
        point.y as usize * self.cols + point.x as usize
    }
    fn checked_point(&self, row: usize, col: usize) -> Result<Point, InvalidCellError> {
        if row < self.rows && col < self.cols {
            Ok(CellPos::new(row, col).to_point())
        } else {
            Err(InvalidCellError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }
    fn blocked(&self, point: &Point) -> bool {
        self.grid.get(point.x as usize, point.y as usize)
    }
    fn role_of(&self, point: &Point) -> Role {
        if self.start.as_ref() == Some(point) {
            Role::Start
        } else if self.end.as_ref() == Some(point) {
            Role::End
        } else {
            Role::Empty
        }
    }
    fn snapshot(&self, point: &Point) -> Cell {
        Cell {
            pos: CellPos::from_point(point),
            role: self.role_of(point),
            obstacle: self.blocked(point),
            tag: self.tags[self.get_ix_point(point)],
        }
    }

    /// Returns a snapshot of the cell at `(row, col)`.
    pub fn cell(&self, row: usize, col: usize) -> Result<Cell, InvalidCellError> {
        let point = self.checked_point(row, col)?;
        Ok(self.snapshot(&point))
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        iproduct!(0..self.rows, 0..self.cols)
            .map(move |(row, col)| self.snapshot(&CellPos::new(row, col).to_point()))
    }

    pub fn is_obstacle(&self, row: usize, col: usize) -> Result<bool, InvalidCellError> {
        let point = self.checked_point(row, col)?;
        Ok(self.blocked(&point))
    }

    /// In-bounds points at unit Manhattan distance, ordered up, down, left, right.
    pub fn neighborhood_points(&self, point: &Point) -> SmallVec<[Point; 4]> {
        NEUMANN_OFFSETS
            .iter()
            .map(|(dx, dy)| Point::new(point.x + dx, point.y + dy))
            .filter(|p| self.in_bounds(p.x, p.y))
            .collect()
    }

    /// Neighbours that can be stepped onto, in the same order as
    /// [neighborhood_points](Self::neighborhood_points).
    pub fn open_neighborhood_points(&self, point: &Point) -> SmallVec<[Point; 4]> {
        let mut points = self.neighborhood_points(point);
        points.retain(|p| !self.blocked(p));
        points
    }

    /// The up to four in-bounds cells adjacent to `(row, col)`, ordered up, down, left, right.
    pub fn neighbors(&self, row: usize, col: usize) -> Result<SmallVec<[Cell; 4]>, InvalidCellError> {
        let point = self.checked_point(row, col)?;
        Ok(self
            .neighborhood_points(&point)
            .iter()
            .map(|p| self.snapshot(p))
            .collect())
    }

    /// Places the start at `(row, col)`, returning the previous start which
    /// reverts to an empty cell. Obstacles and the end cell are rejected.
    pub fn set_start(&mut self, row: usize, col: usize) -> Result<Option<CellPos>, InvalidCellError> {
        let point = self.checked_point(row, col)?;
        if self.blocked(&point) {
            return Err(InvalidCellError::Obstacle { row, col });
        }
        if self.end == Some(point) {
            return Err(InvalidCellError::IsEnd { row, col });
        }
        let previous = self.start.replace(point);
        self.clear_tag(&point);
        debug!("Start set to {}", CellPos::new(row, col));
        Ok(previous.as_ref().map(CellPos::from_point))
    }

    /// Places the end at `(row, col)`, returning the previous end which
    /// reverts to an empty cell. Obstacles and the start cell are rejected.
    pub fn set_end(&mut self, row: usize, col: usize) -> Result<Option<CellPos>, InvalidCellError> {
        let point = self.checked_point(row, col)?;
        if self.blocked(&point) {
            return Err(InvalidCellError::Obstacle { row, col });
        }
        if self.start == Some(point) {
            return Err(InvalidCellError::IsStart { row, col });
        }
        let previous = self.end.replace(point);
        self.clear_tag(&point);
        debug!("End set to {}", CellPos::new(row, col));
        Ok(previous.as_ref().map(CellPos::from_point))
    }

    pub fn clear_start(&mut self) -> Option<CellPos> {
        self.start.take().as_ref().map(CellPos::from_point)
    }
    pub fn clear_end(&mut self) -> Option<CellPos> {
        self.end.take().as_ref().map(CellPos::from_point)
    }

    /// Both endpoints, or which of them is missing.
    pub fn endpoints(&self) -> Result<(Point, Point), MissingEndpointsError> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Ok((start, end)),
            (start, end) => Err(MissingEndpointsError {
                start_missing: start.is_none(),
                end_missing: end.is_none(),
            }),
        }
    }

    /// Flips the obstacle flag of `(row, col)` and returns the new value.
    /// The start and end cells cannot become obstacles.
    pub fn toggle_obstacle(&mut self, row: usize, col: usize) -> Result<bool, InvalidCellError> {
        let blocked = !self.is_obstacle(row, col)?;
        self.set_obstacle(row, col, blocked)?;
        Ok(blocked)
    }

    /// Updates the obstacle flag of `(row, col)`. Joins newly connected components
    /// and flags the components as dirty if they are (potentially) broken apart.
    pub fn set_obstacle(&mut self, row: usize, col: usize, blocked: bool) -> Result<(), InvalidCellError> {
        let point = self.checked_point(row, col)?;
        match self.role_of(&point) {
            Role::Start => return Err(InvalidCellError::IsStart { row, col }),
            Role::End => return Err(InvalidCellError::IsEnd { row, col }),
            Role::Empty => {}
        }
        if self.blocked(&point) == blocked {
            return Ok(());
        }
        if blocked {
            self.components_dirty = true;
            self.clear_tag(&point);
        } else {
            let p_ix = self.get_ix_point(&point);
            for n in self.open_neighborhood_points(&point) {
                let n_ix = self.get_ix_point(&n);
                self.components.union(p_ix, n_ix);
            }
        }
        self.grid.set(point.x as usize, point.y as usize, blocked);
        debug!(
            "Cell {} is now {}",
            CellPos::new(row, col),
            if blocked { "blocked" } else { "open" }
        );
        Ok(())
    }

    pub fn visual_tag(&self, row: usize, col: usize) -> Result<VisualTag, InvalidCellError> {
        let point = self.checked_point(row, col)?;
        Ok(self.tags[self.get_ix_point(&point)])
    }

    /// Tags only describe open empty cells; a cell gaining a role or an obstacle drops its tag.
    fn clear_tag(&mut self, point: &Point) {
        let ix = self.get_ix_point(point);
        self.tags[ix] = VisualTag::Unvisited;
    }

    fn tag(&mut self, pos: CellPos, tag: VisualTag) -> Result<Cell, InvalidCellError> {
        let point = self.checked_point(pos.row, pos.col)?;
        // Endpoints keep their role colouring.
        if self.role_of(&point) == Role::Empty {
            let ix = self.get_ix_point(&point);
            self.tags[ix] = tag;
        }
        Ok(self.snapshot(&point))
    }

    /// Tags `pos` as visited unless it is the start or end, returning the updated snapshot.
    pub fn mark_visited(&mut self, pos: CellPos) -> Result<Cell, InvalidCellError> {
        self.tag(pos, VisualTag::Visited)
    }

    /// Tags `pos` as part of the path unless it is the start or end.
    pub fn mark_path(&mut self, pos: CellPos) -> Result<Cell, InvalidCellError> {
        self.tag(pos, VisualTag::Path)
    }

    pub fn clear_visuals(&mut self) {
        self.tags.fill(VisualTag::Unvisited);
    }

    /// Clears roles, obstacles and visual tags.
    pub fn reset(&mut self) {
        info!("Resetting {}x{} grid", self.rows, self.cols);
        self.grid = BoolGrid::new(self.cols, self.rows, false);
        self.clear_visuals();
        self.start = None;
        self.end = None;
        self.generate_components();
    }

    /// Retrieves the component id a given cell belongs to.
    pub fn get_component(&self, pos: CellPos) -> Result<usize, InvalidCellError> {
        let point = self.checked_point(pos.row, pos.col)?;
        Ok(self.components.find(self.get_ix_point(&point)))
    }

    /// Checks if two open cells are on the same component. Call
    /// [update](Self::update) first if obstacles were added since the last generation.
    pub fn reachable(&self, a: CellPos, b: CellPos) -> Result<bool, InvalidCellError> {
        let a = self.checked_point(a.row, a.col)?;
        let b = self.checked_point(b.row, b.col)?;
        Ok(!self.blocked(&a)
            && !self.blocked(&b)
            && self
                .components
                .equiv(self.get_ix_point(&a), self.get_ix_point(&b)))
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up open grid neighbours to the same components.
    pub fn generate_components(&mut self) {
        self.components = UnionFind::new(self.rows * self.cols);
        self.components_dirty = false;
        for (x, y) in iproduct!(0..self.cols as i32, 0..self.rows as i32) {
            let point = Point::new(x, y);
            if self.blocked(&point) {
                continue;
            }
            let parent_ix = self.get_ix_point(&point);
            for n in [Point::new(x + 1, y), Point::new(x, y + 1)] {
                if self.in_bounds(n.x, n.y) && !self.blocked(&n) {
                    let ix = self.get_ix_point(&n);
                    self.components.union(parent_ix, ix);
                }
            }
        }
    }
}

impl fmt::Display for PathingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.rows {
            let line = (0..self.cols)
                .map(|col| self.snapshot(&CellPos::new(row, col).to_point()).glyph())
                .collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
