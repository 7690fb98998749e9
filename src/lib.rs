//! # grid_pathfinder
//!
//! An interactive grid pathfinder core. A [PathingGrid] holds a start, an end
//! and obstacle cells; a [GridSolver] such as [BfsSolver] computes a
//! [breadth-first search](https://en.wikipedia.org/wiki/Breadth-first_search)
//! over the 4-neighbourhood and returns both the order in which cells were
//! expanded and the shortest path. Note that this assumes a uniform-cost grid.
//!
//! Searching never touches the grid. The expansion can be replayed onto it one
//! event at a time through a [Playback], which tags cells as visited or as part
//! of the path and hands each change to a [VisualizationSink]. [Pathfinder]
//! bundles the grid, its [PathfinderConfig] and a solver for hosts that want
//! the whole workflow, including paced replay.
//!
//! Connected components of open cells are tracked alongside the grid with a
//! [union-find](https://en.wikipedia.org/wiki/Disjoint-set_data_structure)
//! structure, which answers reachability questions without searching.
mod bfs;
pub mod cell;
pub mod config;
pub mod error;
pub mod pathfinder;
pub mod pathing_grid;
pub mod solver;
pub mod visualization;

use itertools::Itertools;

pub use crate::bfs::bfs;
pub use cell::{Cell, CellPos, Role, VisualTag};
pub use config::PathfinderConfig;
pub use error::{ConfigError, Error, InvalidCellError, MissingEndpointsError, Result};
pub use pathfinder::{ClickAction, Pathfinder};
pub use pathing_grid::PathingGrid;
pub use solver::{bfs::BfsSolver, GridSolver, Outcome, SearchResult, Visit};
pub use visualization::{
    FailureReason, NoOpSink, Playback, RecordingSink, SearchEvent, VisualizationSink,
};

/// Checks that consecutive cells of `path` are exactly one 4-directional step apart.
pub fn path_is_contiguous(path: &[CellPos]) -> bool {
    path.iter()
        .tuple_windows()
        .all(|(a, b)| a.manhattan_distance(b) == 1)
}

/// Number of steps taken along `path`, which is one less than its cell count.
pub fn path_length(path: &[CellPos]) -> usize {
    path.len().saturating_sub(1)
}
