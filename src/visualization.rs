use core::fmt;
use log::debug;
use std::collections::VecDeque;

use crate::cell::{Cell, CellPos};
use crate::pathing_grid::PathingGrid;
use crate::solver::{Outcome, SearchResult};

/// Why a search produced no path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FailureReason {
    MissingEndpoints,
    NoPath,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FailureReason::MissingEndpoints => write!(f, "Set both start and end points."),
            FailureReason::NoPath => write!(f, "No path found."),
        }
    }
}

/// Receives search progress, one event at a time. All methods default to doing
/// nothing so renderers only implement what they draw.
pub trait VisualizationSink {
    fn on_cell_visited(&mut self, _cell: &Cell) {}
    fn on_path_cell(&mut self, _cell: &Cell) {}
    fn on_search_failed(&mut self, _reason: FailureReason) {}
    fn on_grid_reset(&mut self) {}
}

pub struct NoOpSink;
impl VisualizationSink for NoOpSink {}

/// Collects every event, mostly useful in tests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordingSink {
    pub events: Vec<SearchEvent>,
    pub resets: usize,
}

impl VisualizationSink for RecordingSink {
    fn on_cell_visited(&mut self, cell: &Cell) {
        self.events.push(SearchEvent::Visited(*cell));
    }
    fn on_path_cell(&mut self, cell: &Cell) {
        self.events.push(SearchEvent::PathCell(*cell));
    }
    fn on_search_failed(&mut self, reason: FailureReason) {
        self.events.push(SearchEvent::Failed(reason));
    }
    fn on_grid_reset(&mut self) {
        self.resets += 1;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchEvent {
    /// Cell snapshot after its visited tag was applied.
    Visited(Cell),
    /// Cell snapshot after its path tag was applied.
    PathCell(Cell),
    Failed(FailureReason),
}

impl SearchEvent {
    pub fn dispatch<V: VisualizationSink + ?Sized>(&self, sink: &mut V) {
        match self {
            SearchEvent::Visited(cell) => sink.on_cell_visited(cell),
            SearchEvent::PathCell(cell) => sink.on_path_cell(cell),
            SearchEvent::Failed(reason) => sink.on_search_failed(*reason),
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Step {
    Visit(CellPos),
    Path(CellPos),
    Fail,
}

/// Replays a finished [SearchResult] onto the grid it was computed from.
///
/// Each call to [next](Iterator::next) applies exactly one visual tag and
/// yields the matching event: first every visit in trace order, then either
/// the path cells from end back to start (endpoints excluded) or a single
/// failure. The grid is exclusively borrowed for the lifetime of the playback,
/// so roles and obstacles cannot change mid-replay. Dropping the playback early
/// cancels it; only visual tags are left behind.
pub struct Playback<'g> {
    grid: &'g mut PathingGrid,
    steps: VecDeque<Step>,
    outcome: Outcome,
}

impl<'g> Playback<'g> {
    pub fn new(grid: &'g mut PathingGrid, result: SearchResult) -> Playback<'g> {
        let SearchResult { trace, outcome } = result;
        let mut steps = trace
            .iter()
            .map(|visit| Step::Visit(visit.pos))
            .collect::<VecDeque<_>>();
        match &outcome {
            Outcome::Found(path) if path.len() > 2 => {
                steps.extend(path[1..path.len() - 1].iter().rev().map(|&pos| Step::Path(pos)));
            }
            Outcome::Found(_) => {}
            Outcome::NotFound => steps.push_back(Step::Fail),
        }
        Playback {
            grid,
            steps,
            outcome,
        }
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Events not yet emitted.
    pub fn remaining(&self) -> usize {
        self.steps.len()
    }

    pub fn grid(&self) -> &PathingGrid {
        &*self.grid
    }

    /// Emits every remaining event into `sink` without pausing.
    pub fn drain_into<V: VisualizationSink + ?Sized>(&mut self, sink: &mut V) {
        for event in self.by_ref() {
            event.dispatch(sink);
        }
    }

    pub fn into_outcome(self) -> Outcome {
        self.outcome
    }
}

impl Iterator for Playback<'_> {
    type Item = SearchEvent;

    fn next(&mut self) -> Option<SearchEvent> {
        loop {
            let step = self.steps.pop_front()?;
            let event = match step {
                Step::Visit(pos) => self.grid.mark_visited(pos).map(SearchEvent::Visited),
                Step::Path(pos) => self.grid.mark_path(pos).map(SearchEvent::PathCell),
                Step::Fail => Ok(SearchEvent::Failed(FailureReason::NoPath)),
            };
            match event {
                Ok(event) => return Some(event),
                // Only reachable when a result is replayed onto a smaller grid.
                Err(e) => debug!("Skipping replay step: {}", e),
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.steps.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::VisualTag;
    use crate::solver::{bfs::BfsSolver, GridSolver};

    fn corridor() -> PathingGrid {
        // |S..E|
        let mut grid = PathingGrid::new(1, 4);
        grid.set_start(0, 0).unwrap();
        grid.set_end(0, 3).unwrap();
        grid
    }

    #[test]
    fn path_cells_run_from_end_to_start() {
        let mut grid = corridor();
        let result = BfsSolver::new().search(&grid).unwrap();
        let events = Playback::new(&mut grid, result).collect::<Vec<_>>();
        let path_cells = events
            .iter()
            .filter_map(|e| match e {
                SearchEvent::PathCell(cell) => Some(cell.col()),
                _ => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(path_cells, vec![2, 1]);
        assert_eq!(grid.to_string(), "S**E\n");
    }

    #[test]
    fn visits_precede_path() {
        let mut grid = corridor();
        let result = BfsSolver::new().search(&grid).unwrap();
        let events = Playback::new(&mut grid, result).collect::<Vec<_>>();
        let first_path = events
            .iter()
            .position(|e| matches!(e, SearchEvent::PathCell(_)))
            .unwrap();
        assert!(events[..first_path]
            .iter()
            .all(|e| matches!(e, SearchEvent::Visited(_))));
        assert_eq!(first_path, 4);
    }

    #[test]
    fn failure_is_emitted_last() {
        let mut grid = PathingGrid::new(1, 3);
        grid.toggle_obstacle(0, 1).unwrap();
        grid.set_start(0, 0).unwrap();
        grid.set_end(0, 2).unwrap();
        let result = BfsSolver::new().search(&grid).unwrap();
        let mut sink = RecordingSink::default();
        let mut playback = Playback::new(&mut grid, result);
        playback.drain_into(&mut sink);
        assert_eq!(playback.outcome(), &Outcome::NotFound);
        assert_eq!(
            sink.events.last(),
            Some(&SearchEvent::Failed(FailureReason::NoPath))
        );
    }

    #[test]
    fn cancelling_keeps_roles_and_obstacles() {
        let mut grid = PathingGrid::new(3, 3);
        grid.toggle_obstacle(1, 1).unwrap();
        grid.set_start(0, 0).unwrap();
        grid.set_end(2, 2).unwrap();
        let result = BfsSolver::new().search(&grid).unwrap();
        {
            let mut playback = Playback::new(&mut grid, result);
            assert!(playback.next().is_some());
            assert!(playback.next().is_some());
        }
        assert_eq!(grid.start(), Some(CellPos::new(0, 0)));
        assert_eq!(grid.end(), Some(CellPos::new(2, 2)));
        assert!(grid.is_obstacle(1, 1).unwrap());
        assert_eq!(grid.visual_tag(1, 0).unwrap(), VisualTag::Visited);
        assert_eq!(grid.visual_tag(0, 1).unwrap(), VisualTag::Unvisited);
    }

    #[test]
    fn adjacent_endpoints_emit_no_path_cells() {
        let mut grid = PathingGrid::new(1, 2);
        grid.set_start(0, 0).unwrap();
        grid.set_end(0, 1).unwrap();
        let result = BfsSolver::new().search(&grid).unwrap();
        let events = Playback::new(&mut grid, result).collect::<Vec<_>>();
        assert!(events
            .iter()
            .all(|e| matches!(e, SearchEvent::Visited(_))));
        assert_eq!(events.len(), 2);
    }
}
