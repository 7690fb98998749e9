use thiserror::Error;

/// A grid operation was given a cell it cannot act on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum InvalidCellError {
    #[error("cell ({row}, {col}) lies outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("cell ({row}, {col}) is an obstacle")]
    Obstacle { row: usize, col: usize },
    #[error("cell ({row}, {col}) is the start")]
    IsStart { row: usize, col: usize },
    #[error("cell ({row}, {col}) is the end")]
    IsEnd { row: usize, col: usize },
}

/// A search was requested before both endpoints were placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("set both start and end points (start missing: {start_missing}, end missing: {end_missing})")]
pub struct MissingEndpointsError {
    pub start_missing: bool,
    pub end_missing: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    ZeroDimension { rows: usize, cols: usize },
}

/// Umbrella error for hosts that drive a [Pathfinder](crate::Pathfinder) with `?`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    InvalidCell(#[from] InvalidCellError),
    #[error(transparent)]
    MissingEndpoints(#[from] MissingEndpointsError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
