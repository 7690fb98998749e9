use grid_util::point::Point;
use log::{info, warn};

use crate::cell::CellPos;
use crate::error::MissingEndpointsError;
use crate::pathing_grid::PathingGrid;

pub mod bfs;

/// One expanded cell together with its position in the expansion order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Visit {
    pub pos: CellPos,
    pub order: usize,
}

/// How a search ended. Not finding a path is a regular outcome, distinct from
/// [MissingEndpointsError].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Cells from start to end inclusive.
    Found(Vec<CellPos>),
    NotFound,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub trace: Vec<Visit>,
    pub outcome: Outcome,
}

impl SearchResult {
    pub fn path(&self) -> Option<&[CellPos]> {
        match &self.outcome {
            Outcome::Found(path) => Some(path),
            Outcome::NotFound => None,
        }
    }
    pub fn is_found(&self) -> bool {
        matches!(self.outcome, Outcome::Found(_))
    }
    pub fn visited_count(&self) -> usize {
        self.trace.len()
    }
}

/// A strategy that, given a grid and its endpoints, yields a visitation trace
/// and possibly a path. Implementors only provide [explore](Self::explore).
pub trait GridSolver {
    /// Searches from `start` to `goal`, calling `on_visit` for every expanded
    /// point in expansion order. Must not mutate the grid.
    fn explore<F>(&self, grid: &PathingGrid, start: Point, goal: Point, on_visit: F) -> Option<Vec<Point>>
    where
        F: FnMut(&Point, usize);

    /// Searches between the grid's start and end. The grid is only read;
    /// tagging visited and path cells is left to the caller.
    fn search(&self, grid: &PathingGrid) -> Result<SearchResult, MissingEndpointsError> {
        let (start, goal) = grid.endpoints().map_err(|e| {
            warn!("Search requested without endpoints: {}", e);
            e
        })?;
        let (start_pos, goal_pos) = (CellPos::from_point(&start), CellPos::from_point(&goal));
        info!("Searching from {} to {}", start_pos, goal_pos);
        let mut trace = Vec::new();
        let path = self.explore(grid, start, goal, |point, order| {
            trace.push(Visit {
                pos: CellPos::from_point(point),
                order,
            })
        });
        let outcome = match path {
            Some(points) => {
                info!(
                    "Path of {} cells found after visiting {} cells",
                    points.len(),
                    trace.len()
                );
                Outcome::Found(points.iter().map(CellPos::from_point).collect())
            }
            None => {
                info!(
                    "{} is not reachable from {}, visited {} cells",
                    goal_pos,
                    start_pos,
                    trace.len()
                );
                Outcome::NotFound
            }
        };
        Ok(SearchResult { trace, outcome })
    }
}
