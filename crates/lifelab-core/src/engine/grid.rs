use super::error::EngineError;
use crate::core::models::geometry::CellVec;
use crate::core::models::grid::Grid;
use crate::core::models::pattern::PatternTemplate;
use tracing::{debug, trace};

/// Owns the authoritative cell grid plus its generation and population
/// counters. Mutated only by [`GridEngine::step`], the commit-time merge and
/// the precise [`GridEngine::set_cell`] API.
#[derive(Debug, Clone)]
pub struct GridEngine {
    grid: Grid,
    generation: u64,
    population: usize,
    // Scratch buffers reused across steps so the hot path never allocates.
    next: Vec<u8>,
    col_sums: Vec<u8>,
}

impl GridEngine {
    pub fn new(rows: usize, cols: usize) -> Result<Self, EngineError> {
        let grid = Grid::new(rows, cols)?;
        debug!("Grid engine initialised with a {}x{} grid", rows, cols);
        Ok(Self {
            grid,
            generation: 0,
            population: 0,
            next: vec![0; rows * cols],
            col_sums: vec![0; cols],
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.population
    }

    /// Direct cell write. Out-of-bounds is a caller error, not a clip.
    pub fn set_cell(&mut self, row: usize, col: usize, alive: bool) -> Result<(), EngineError> {
        let was_alive = self.grid.get(row, col)?;
        self.grid.set(row, col, alive)?;
        match (was_alive, alive) {
            (false, true) => self.population += 1,
            (true, false) => self.population -= 1,
            _ => {}
        }
        Ok(())
    }

    /// OR-merges a template at `pos`, clipping anything outside the bounds.
    pub fn merge_pattern(&mut self, pos: CellVec, template: &PatternTemplate) {
        self.grid.merge(pos, template);
        self.population = self.grid.population();
        trace!(
            "Merged '{}/{}' at ({}, {}); population now {}",
            template.category(),
            template.name(),
            pos.x,
            pos.y,
            self.population
        );
    }

    /// Advances the grid by one generation and returns the new population.
    ///
    /// Neighbor counts are computed entirely from the pre-step grid and the
    /// whole new grid is committed at once. The counting pass is separable:
    /// per output row a three-row column-sum buffer is built, then a
    /// three-wide sliding window runs over it, so the cost stays O(rows*cols)
    /// instead of a 3x3 re-sum per cell. The boundary is zero-padded.
    pub fn step(&mut self) -> usize {
        let rows = self.grid.rows();
        let cols = self.grid.cols();
        let cells = self.grid.cells();
        let mut population = 0;

        for r in 0..rows {
            for c in 0..cols {
                let mut sum = cells[r * cols + c];
                if r > 0 {
                    sum += cells[(r - 1) * cols + c];
                }
                if r + 1 < rows {
                    sum += cells[(r + 1) * cols + c];
                }
                self.col_sums[c] = sum;
            }

            // window = col_sums[c-1] + col_sums[c] + col_sums[c+1], clipped.
            let mut window = self.col_sums[0];
            if cols > 1 {
                window += self.col_sums[1];
            }
            for c in 0..cols {
                let alive = cells[r * cols + c] != 0;
                let neighbours = window - cells[r * cols + c];
                let survives = neighbours == 3 || (alive && neighbours == 2);
                self.next[r * cols + c] = survives as u8;
                population += survives as usize;

                if c + 2 < cols {
                    window += self.col_sums[c + 2];
                }
                if c > 0 {
                    window -= self.col_sums[c - 1];
                }
            }
        }

        self.grid.swap_cells(&mut self.next);
        self.generation += 1;
        self.population = population;
        trace!(
            "Generation {} complete, population {}",
            self.generation, self.population
        );
        population
    }

    /// Clears the grid and zeroes both counters.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.generation = 0;
        self.population = 0;
        debug!("Grid engine reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(rows: &[&str]) -> PatternTemplate {
        PatternTemplate::from_rows("test", "t", rows).unwrap()
    }

    fn live_cells(engine: &GridEngine) -> Vec<(usize, usize)> {
        let grid = engine.grid();
        let mut cells = Vec::new();
        for r in 0..grid.rows() {
            for c in 0..grid.cols() {
                if grid.get(r, c).unwrap() {
                    cells.push((r, c));
                }
            }
        }
        cells
    }

    #[test]
    fn invalid_dimensions_fail_construction() {
        assert_eq!(
            GridEngine::new(0, 5).unwrap_err(),
            EngineError::InvalidDimension { rows: 0, cols: 5 }
        );
    }

    #[test]
    fn stepping_an_all_dead_grid_stays_dead() {
        let mut engine = GridEngine::new(8, 8).unwrap();
        assert_eq!(engine.step(), 0);
        assert_eq!(engine.population(), 0);
        assert_eq!(engine.generation(), 1);
    }

    #[test]
    fn a_lone_cell_dies_of_isolation() {
        let mut engine = GridEngine::new(5, 5).unwrap();
        engine.set_cell(2, 2, true).unwrap();
        assert_eq!(engine.population(), 1);
        assert_eq!(engine.step(), 0);
        assert_eq!(live_cells(&engine), vec![]);
    }

    #[test]
    fn a_block_is_a_still_life() {
        let mut engine = GridEngine::new(6, 6).unwrap();
        engine.merge_pattern(CellVec::new(2, 2), &template(&["##", "##"]));
        let initial = live_cells(&engine);
        for _ in 0..5 {
            assert_eq!(engine.step(), 4);
            assert_eq!(live_cells(&engine), initial);
        }
        assert_eq!(engine.generation(), 5);
    }

    #[test]
    fn a_blinker_oscillates_with_period_two() {
        let mut engine = GridEngine::new(5, 5).unwrap();
        engine.merge_pattern(CellVec::new(1, 2), &template(&["###"]));
        let horizontal = live_cells(&engine);
        assert_eq!(horizontal, vec![(2, 1), (2, 2), (2, 3)]);

        assert_eq!(engine.step(), 3);
        assert_eq!(live_cells(&engine), vec![(1, 2), (2, 2), (3, 2)]);

        assert_eq!(engine.step(), 3);
        assert_eq!(live_cells(&engine), horizontal);
    }

    #[test]
    fn a_glider_translates_by_one_one_every_four_steps() {
        let glider = template(&["_#_", "__#", "###"]);
        let mut engine = GridEngine::new(10, 10).unwrap();
        engine.merge_pattern(CellVec::new(1, 1), &glider);
        let initial = live_cells(&engine);

        for _ in 0..4 {
            assert_eq!(engine.step(), 5, "glider population must stay at 5");
        }

        let translated: Vec<_> = initial.iter().map(|&(r, c)| (r + 1, c + 1)).collect();
        assert_eq!(live_cells(&engine), translated);
    }

    #[test]
    fn edge_clipped_merge_counts_only_in_bounds_cells() {
        let mut engine = GridEngine::new(5, 5).unwrap();
        // Glider shifted so its left column and top row fall outside.
        engine.merge_pattern(CellVec::new(-1, -1), &template(&["_#_", "__#", "###"]));
        // Rows 0..=1, cols 0..=1 of the grid hold the in-bounds remainder:
        // (1,2)->(0,1), (2,1)->(1,0), (2,2)->(1,1) survive the clip; (0,1)
        // and (2,0) are gone.
        assert_eq!(engine.population(), 3);
        assert_eq!(live_cells(&engine), vec![(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn step_with_live_cells_hugging_the_boundary_stays_in_bounds() {
        let mut engine = GridEngine::new(3, 3).unwrap();
        // Vertical blinker on the left edge.
        engine.set_cell(0, 0, true).unwrap();
        engine.set_cell(1, 0, true).unwrap();
        engine.set_cell(2, 0, true).unwrap();

        // Zero-padded boundary: the third cell of the horizontal phase would
        // sit at column -1, so it is never born. No wrap-around.
        assert_eq!(engine.step(), 2);
        assert_eq!(live_cells(&engine), vec![(1, 0), (1, 1)]);
    }

    #[test]
    fn single_row_grid_has_no_vertical_neighbours() {
        let mut engine = GridEngine::new(1, 5).unwrap();
        engine.merge_pattern(CellVec::new(1, 0), &template(&["###"]));
        // Each cell has at most 2 horizontal neighbours; the ends die, the
        // centre survives with 2 but its new neighbours never appear.
        assert_eq!(engine.step(), 1);
        assert_eq!(live_cells(&engine), vec![(0, 2)]);
        assert_eq!(engine.step(), 0);
    }

    #[test]
    fn reset_zeroes_grid_and_counters() {
        let mut engine = GridEngine::new(5, 5).unwrap();
        engine.merge_pattern(CellVec::new(0, 0), &template(&["##", "##"]));
        engine.step();
        engine.reset();
        assert_eq!(engine.generation(), 0);
        assert_eq!(engine.population(), 0);
        assert_eq!(live_cells(&engine), vec![]);
    }

    #[test]
    fn set_cell_out_of_bounds_is_a_precise_error() {
        let mut engine = GridEngine::new(3, 3).unwrap();
        assert_eq!(
            engine.set_cell(5, 1, true).unwrap_err(),
            EngineError::OutOfBounds {
                row: 5,
                col: 1,
                rows: 3,
                cols: 3
            }
        );
    }
}
