/// Fuzzes the search by checking on many random grids that a path is found exactly when the goal
/// is on the same connected component as the start, and that it is as short as an independent
/// reference search says it can be.
use grid_pathfinder::{
    path_is_contiguous, path_length, BfsSolver, CellPos, GridSolver, PathingGrid, Playback,
    VisualTag,
};
use rand::prelude::*;
use std::collections::{HashSet, VecDeque};

fn random_grid(rows: usize, cols: usize, rng: &mut StdRng, density: f64) -> PathingGrid {
    let mut grid = PathingGrid::new(rows, cols);
    for row in 0..rows {
        for col in 0..cols {
            grid.set_obstacle(row, col, rng.gen_bool(density)).unwrap();
        }
    }
    grid
}

/// Plain distance-map BFS that only relies on obstacle queries.
fn reference_distance(grid: &PathingGrid, start: CellPos, goal: CellPos) -> Option<usize> {
    let (rows, cols) = (grid.rows(), grid.cols());
    let mut dist = vec![vec![usize::MAX; cols]; rows];
    let mut queue = VecDeque::new();
    dist[start.row][start.col] = 0;
    queue.push_back(start);
    while let Some(pos) = queue.pop_front() {
        if pos == goal {
            return Some(dist[pos.row][pos.col]);
        }
        let (r, c) = (pos.row as i64, pos.col as i64);
        for (nr, nc) in [(r - 1, c), (r + 1, c), (r, c - 1), (r, c + 1)] {
            if nr < 0 || nc < 0 || nr >= rows as i64 || nc >= cols as i64 {
                continue;
            }
            let (nr, nc) = (nr as usize, nc as usize);
            if dist[nr][nc] == usize::MAX && !grid.is_obstacle(nr, nc).unwrap() {
                dist[nr][nc] = dist[pos.row][pos.col] + 1;
                queue.push_back(CellPos::new(nr, nc));
            }
        }
    }
    None
}

fn visualize_grid(grid: &PathingGrid) {
    print!("{}", grid);
}

#[test]
fn fuzz() {
    const N: usize = 10;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    let solver = BfsSolver::new();
    let start = CellPos::new(0, 0);
    let end = CellPos::new(N - 1, N - 1);
    for _ in 0..N_GRIDS {
        let mut grid = random_grid(N, N, &mut rng, 0.4);
        grid.set_obstacle(start.row, start.col, false).unwrap();
        grid.set_obstacle(end.row, end.col, false).unwrap();
        grid.set_start(start.row, start.col).unwrap();
        grid.set_end(end.row, end.col).unwrap();
        grid.update();
        let reachable = grid.reachable(start, end).unwrap();
        let result = solver.search(&grid).unwrap();
        // Show the grid if the outcome disagrees with the components
        if result.is_found() != reachable {
            visualize_grid(&grid);
        }
        assert_eq!(result.is_found(), reachable);
        if let Some(path) = result.path() {
            assert_eq!(path.first(), Some(&start));
            assert_eq!(path.last(), Some(&end));
            assert!(path_is_contiguous(path));
            assert!(path
                .iter()
                .all(|p| !grid.is_obstacle(p.row, p.col).unwrap()));
            assert_eq!(
                Some(path_length(path)),
                reference_distance(&grid, start, end)
            );
        }
    }
}

#[test]
fn fuzz_open_grid_is_manhattan() {
    const N_PAIRS: usize = 500;
    let mut rng = StdRng::seed_from_u64(1);
    let solver = BfsSolver::new();
    for _ in 0..N_PAIRS {
        let rows = rng.gen_range(1..12);
        let cols = rng.gen_range(1..12);
        if rows * cols < 2 {
            continue;
        }
        let mut grid = PathingGrid::new(rows, cols);
        let start = CellPos::new(rng.gen_range(0..rows), rng.gen_range(0..cols));
        let mut end = start;
        while end == start {
            end = CellPos::new(rng.gen_range(0..rows), rng.gen_range(0..cols));
        }
        grid.set_start(start.row, start.col).unwrap();
        grid.set_end(end.row, end.col).unwrap();
        let result = solver.search(&grid).unwrap();
        let path = result.path().unwrap();
        assert_eq!(path_length(path), start.manhattan_distance(&end));
    }
}

#[test]
fn fuzz_trace_completeness() {
    const N: usize = 8;
    const N_GRIDS: usize = 500;
    let mut rng = StdRng::seed_from_u64(2);
    let solver = BfsSolver::new();
    for _ in 0..N_GRIDS {
        let mut grid = random_grid(N, N, &mut rng, 0.3);
        let start = CellPos::new(rng.gen_range(0..N), rng.gen_range(0..N));
        let mut end = start;
        while end == start {
            end = CellPos::new(rng.gen_range(0..N), rng.gen_range(0..N));
        }
        for pos in [start, end] {
            grid.set_obstacle(pos.row, pos.col, false).unwrap();
        }
        grid.set_start(start.row, start.col).unwrap();
        grid.set_end(end.row, end.col).unwrap();
        let result = solver.search(&grid).unwrap();

        let mut seen = HashSet::new();
        for (i, visit) in result.trace.iter().enumerate() {
            assert_eq!(visit.order, i);
            assert!(seen.insert(visit.pos), "{} visited twice", visit.pos);
            assert!(!grid.is_obstacle(visit.pos.row, visit.pos.col).unwrap());
        }
        assert_eq!(result.trace.first().map(|v| v.pos), Some(start));
        if result.is_found() {
            assert_eq!(result.trace.last().map(|v| v.pos), Some(end));
        }

        Playback::new(&mut grid, result).for_each(drop);
        for cell in grid.cells() {
            let tagged = cell.tag != VisualTag::Unvisited;
            let expected = seen.contains(&cell.pos) && !cell.is_start() && !cell.is_end();
            assert_eq!(tagged, expected, "unexpected tag at {}", cell.pos);
        }
    }
}
