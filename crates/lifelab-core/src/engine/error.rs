use crate::core::models::grid::GridError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Grid dimensions must both be at least 1, got {rows}x{cols}")]
    InvalidDimension { rows: usize, cols: usize },

    #[error("Cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error(
        "Pattern '{category}/{name}' at ({x}, {y}) falls entirely outside the {rows}x{cols} grid"
    )]
    PlacementOutOfBounds {
        category: String,
        name: String,
        x: i32,
        y: i32,
        rows: usize,
        cols: usize,
    },

    #[error("Pattern '{category}/{name}' is not in the library")]
    UnknownPattern { category: String, name: String },
}

impl From<GridError> for EngineError {
    fn from(err: GridError) -> Self {
        match err {
            GridError::InvalidDimension { rows, cols } => {
                EngineError::InvalidDimension { rows, cols }
            }
            GridError::OutOfBounds {
                row,
                col,
                rows,
                cols,
            } => EngineError::OutOfBounds {
                row,
                col,
                rows,
                cols,
            },
        }
    }
}
