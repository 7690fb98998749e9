use grid_util::point::Point;

use crate::{bfs::bfs, pathing_grid::PathingGrid, solver::GridSolver};

/// Breadth-first search over the 4-neighbourhood. Every step costs the same,
/// so the first path reaching the goal is a shortest one. Ties between equally
/// short paths are broken by the up, down, left, right neighbour order.
#[derive(Clone, Copy, Debug, Default)]
pub struct BfsSolver;

impl BfsSolver {
    pub fn new() -> BfsSolver {
        BfsSolver
    }
}

impl GridSolver for BfsSolver {
    fn explore<F>(&self, grid: &PathingGrid, start: Point, goal: Point, on_visit: F) -> Option<Vec<Point>>
    where
        F: FnMut(&Point, usize),
    {
        bfs(
            &start,
            |node| grid.open_neighborhood_points(node),
            |node| *node == goal,
            on_visit,
        )
    }
}
