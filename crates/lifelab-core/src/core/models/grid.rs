use super::geometry::CellVec;
use super::pattern::PatternTemplate;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Grid dimensions must both be at least 1, got {rows}x{cols}")]
    InvalidDimension { rows: usize, cols: usize },

    #[error("Cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

/// A fixed-size field of cells with a closed (all-dead) boundary.
///
/// Dimensions are fixed for the lifetime of the value. Cells are stored as
/// bytes in row-major order; everything outside the bounds reads as dead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::InvalidDimension { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![0; rows * cols],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Reads a cell, treating anything outside the bounds as dead.
    pub fn is_alive(&self, row: i64, col: i64) -> bool {
        if row < 0 || col < 0 || row >= self.rows as i64 || col >= self.cols as i64 {
            return false;
        }
        self.cells[row as usize * self.cols + col as usize] != 0
    }

    /// Precise cell read; out-of-bounds access is a caller error.
    pub fn get(&self, row: usize, col: usize) -> Result<bool, GridError> {
        self.index(row, col).map(|idx| self.cells[idx] != 0)
    }

    /// Precise cell write; out-of-bounds access is a caller error.
    pub fn set(&mut self, row: usize, col: usize, alive: bool) -> Result<(), GridError> {
        let idx = self.index(row, col)?;
        self.cells[idx] = alive as u8;
        Ok(())
    }

    /// OR-merges a template into the grid at `origin` (x = column, y = row).
    ///
    /// Portions extending outside the bounds are clipped, never an error.
    pub fn merge(&mut self, origin: CellVec, template: &PatternTemplate) {
        for (r, c) in template.live_cells() {
            let row = origin.y as i64 + r as i64;
            let col = origin.x as i64 + c as i64;
            if row < 0 || col < 0 || row >= self.rows as i64 || col >= self.cols as i64 {
                continue;
            }
            self.cells[row as usize * self.cols + col as usize] = 1;
        }
    }

    /// The number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    /// Kills every cell.
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    pub(crate) fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Swaps the cell storage with `buffer`, which must have the same length.
    pub(crate) fn swap_cells(&mut self, buffer: &mut Vec<u8>) {
        debug_assert_eq!(buffer.len(), self.cells.len());
        std::mem::swap(&mut self.cells, buffer);
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, GridError> {
        if row >= self.rows || col >= self.cols {
            return Err(GridError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(row * self.cols + col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(rows: &[&str]) -> PatternTemplate {
        PatternTemplate::from_rows("test", "t", rows).unwrap()
    }

    #[test]
    fn zero_dimension_is_rejected() {
        assert_eq!(
            Grid::new(0, 10),
            Err(GridError::InvalidDimension { rows: 0, cols: 10 })
        );
        assert_eq!(
            Grid::new(10, 0),
            Err(GridError::InvalidDimension { rows: 10, cols: 0 })
        );
    }

    #[test]
    fn new_grid_is_all_dead() {
        let grid = Grid::new(4, 6).unwrap();
        assert_eq!(grid.population(), 0);
        assert_eq!(grid.get(3, 5), Ok(false));
    }

    #[test]
    fn set_and_get_round_trip() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set(1, 2, true).unwrap();
        assert_eq!(grid.get(1, 2), Ok(true));
        assert!(grid.is_alive(1, 2));
        grid.set(1, 2, false).unwrap();
        assert_eq!(grid.get(1, 2), Ok(false));
    }

    #[test]
    fn precise_access_past_extent_is_an_error() {
        let mut grid = Grid::new(3, 3).unwrap();
        assert_eq!(
            grid.set(3, 0, true),
            Err(GridError::OutOfBounds {
                row: 3,
                col: 0,
                rows: 3,
                cols: 3
            })
        );
        assert!(grid.get(0, 3).is_err());
    }

    #[test]
    fn boundary_reads_as_dead() {
        let grid = Grid::new(3, 3).unwrap();
        assert!(!grid.is_alive(-1, 0));
        assert!(!grid.is_alive(0, -1));
        assert!(!grid.is_alive(3, 0));
        assert!(!grid.is_alive(0, 3));
    }

    #[test]
    fn merge_is_a_boolean_or() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set(0, 0, true).unwrap();
        grid.merge(CellVec::new(0, 0), &template(&["#_", "_#"]));
        assert_eq!(grid.population(), 2);
        assert_eq!(grid.get(0, 0), Ok(true));
        assert_eq!(grid.get(1, 1), Ok(true));
    }

    #[test]
    fn merge_clips_at_every_edge() {
        let mut grid = Grid::new(4, 4).unwrap();
        let block = template(&["##", "##"]);

        // One column hangs off the right edge, one row off the bottom.
        grid.merge(CellVec::new(3, 3), &block);
        assert_eq!(grid.population(), 1);
        assert_eq!(grid.get(3, 3), Ok(true));

        // Negative origin clips at the top-left corner.
        grid.clear();
        grid.merge(CellVec::new(-1, -1), &block);
        assert_eq!(grid.population(), 1);
        assert_eq!(grid.get(0, 0), Ok(true));
    }

    #[test]
    fn merge_entirely_outside_writes_nothing() {
        let mut grid = Grid::new(4, 4).unwrap();
        grid.merge(CellVec::new(10, 10), &template(&["##", "##"]));
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn clear_kills_everything() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.merge(CellVec::new(0, 0), &template(&["###"]));
        assert_eq!(grid.population(), 3);
        grid.clear();
        assert_eq!(grid.population(), 0);
    }
}
