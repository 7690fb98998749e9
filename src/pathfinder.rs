use log::{debug, info};
use std::thread;

use crate::cell::CellPos;
use crate::config::PathfinderConfig;
use crate::error::{ConfigError, InvalidCellError, MissingEndpointsError};
use crate::pathing_grid::PathingGrid;
use crate::solver::{bfs::BfsSolver, GridSolver, Outcome};
use crate::visualization::{FailureReason, Playback, SearchEvent, VisualizationSink};

/// What a [click](Pathfinder::click) ended up doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickAction {
    PlacedStart(CellPos),
    PlacedEnd(CellPos),
    ToggledObstacle { pos: CellPos, blocked: bool },
}

/// Owns a grid together with its configuration and search strategy, and
/// exposes the operations a presentation layer drives.
#[derive(Clone, Debug)]
pub struct Pathfinder<S = BfsSolver> {
    grid: PathingGrid,
    config: PathfinderConfig,
    solver: S,
}

impl Pathfinder<BfsSolver> {
    pub fn new(config: PathfinderConfig) -> Result<Self, ConfigError> {
        Pathfinder::with_solver(config, BfsSolver::new())
    }
}

impl Default for Pathfinder<BfsSolver> {
    fn default() -> Self {
        let config = PathfinderConfig::default();
        Pathfinder {
            grid: PathingGrid::new(config.rows, config.cols),
            config,
            solver: BfsSolver::new(),
        }
    }
}

impl<S: GridSolver> Pathfinder<S> {
    pub fn with_solver(config: PathfinderConfig, solver: S) -> Result<Self, ConfigError> {
        let grid = PathingGrid::from_config(&config)?;
        info!(
            "Created {}x{} pathfinder, {} ms per step",
            config.rows, config.cols, config.step_delay_ms
        );
        Ok(Pathfinder {
            grid,
            config,
            solver,
        })
    }

    pub fn grid(&self) -> &PathingGrid {
        &self.grid
    }
    pub fn config(&self) -> &PathfinderConfig {
        &self.config
    }
    pub fn solver(&self) -> &S {
        &self.solver
    }

    pub fn place_start(&mut self, row: usize, col: usize) -> Result<Option<CellPos>, InvalidCellError> {
        self.grid.set_start(row, col)
    }

    pub fn place_end(&mut self, row: usize, col: usize) -> Result<Option<CellPos>, InvalidCellError> {
        self.grid.set_end(row, col)
    }

    pub fn toggle_obstacle(&mut self, row: usize, col: usize) -> Result<bool, InvalidCellError> {
        self.grid.toggle_obstacle(row, col)
    }

    /// One-button editing: the first click places the start, the next one the
    /// end, and every later click toggles an obstacle.
    pub fn click(&mut self, row: usize, col: usize) -> Result<ClickAction, InvalidCellError> {
        let pos = CellPos::new(row, col);
        let action = if self.grid.start().is_none() {
            self.grid.set_start(row, col)?;
            ClickAction::PlacedStart(pos)
        } else if self.grid.end().is_none() {
            self.grid.set_end(row, col)?;
            ClickAction::PlacedEnd(pos)
        } else {
            let blocked = self.grid.toggle_obstacle(row, col)?;
            ClickAction::ToggledObstacle { pos, blocked }
        };
        debug!("Click at {} -> {:?}", pos, action);
        Ok(action)
    }

    /// Runs the search, clears old visual tags and returns a [Playback] that
    /// applies the result one event at a time. Pacing is up to the caller.
    /// A failed search leaves the previous rendering in place.
    pub fn begin_search(&mut self) -> Result<Playback<'_>, MissingEndpointsError> {
        let result = self.solver.search(&self.grid)?;
        self.grid.clear_visuals();
        Ok(Playback::new(&mut self.grid, result))
    }

    /// Runs a search and forwards every event to `sink`, sleeping for the
    /// configured step delay between two visitation events. A missing endpoint
    /// is reported to the sink before the error is returned.
    pub fn run_search<V: VisualizationSink + ?Sized>(
        &mut self,
        sink: &mut V,
    ) -> Result<Outcome, MissingEndpointsError> {
        let delay = self.config.step_delay();
        let mut playback = match self.begin_search() {
            Ok(playback) => playback,
            Err(e) => {
                sink.on_search_failed(FailureReason::MissingEndpoints);
                return Err(e);
            }
        };
        let mut visited_any = false;
        for event in playback.by_ref() {
            if let SearchEvent::Visited(_) = event {
                if visited_any && !delay.is_zero() {
                    thread::sleep(delay);
                }
                visited_any = true;
            }
            event.dispatch(sink);
        }
        Ok(playback.into_outcome())
    }

    /// Clears the grid and tells `sink` about it.
    pub fn reset<V: VisualizationSink + ?Sized>(&mut self, sink: &mut V) {
        self.grid.reset();
        sink.on_grid_reset();
    }
}
