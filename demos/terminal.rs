use grid_pathfinder::{
    Cell, Error, FailureReason, Pathfinder, PathfinderConfig, PathingGrid, VisualizationSink,
};

// Replays a search on a 10x20 grid in the terminal with a wall that forces a
// detour:
//  ____________________
// |S                   |
// |                    |
// |    #########       |
// |            #       |
// |            #   E   |
// ...
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
// - o marks a visited cell
// - * marks the path

struct TerminalSink {
    frame: PathingGrid,
}

impl TerminalSink {
    fn redraw(&self) {
        // Clear screen and move the cursor home.
        print!("\x1b[2J\x1b[H{}", self.frame);
    }
}

impl VisualizationSink for TerminalSink {
    fn on_cell_visited(&mut self, cell: &Cell) {
        self.frame.mark_visited(cell.pos).ok();
        self.redraw();
    }
    fn on_path_cell(&mut self, cell: &Cell) {
        self.frame.mark_path(cell.pos).ok();
        self.redraw();
    }
    fn on_search_failed(&mut self, reason: FailureReason) {
        println!("{}", reason);
    }
    fn on_grid_reset(&mut self) {
        self.frame.reset();
        self.redraw();
    }
}

fn main() -> Result<(), Error> {
    let config = PathfinderConfig::new(10, 20).with_step_delay_ms(20);
    let mut pathfinder = Pathfinder::new(config)?;
    pathfinder.click(0, 0)?;
    pathfinder.click(4, 16)?;
    for col in 4..13 {
        pathfinder.click(2, col)?;
    }
    for row in 3..8 {
        pathfinder.click(row, 12)?;
    }

    let mut sink = TerminalSink {
        frame: pathfinder.grid().clone(),
    };
    sink.redraw();
    let outcome = pathfinder.run_search(&mut sink)?;
    println!("{:?}", outcome);
    Ok(())
}
