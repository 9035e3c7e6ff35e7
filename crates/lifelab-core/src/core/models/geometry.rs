use nalgebra::Vector2;

/// A vector in cell space: `x` is the column, `y` is the row.
///
/// Signed so that positions of partially off-grid instances and move deltas
/// can both be expressed with one type.
pub type CellVec = Vector2<i32>;

/// The four directions a selected instance can be nudged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The unit move delta for this direction.
    pub fn unit(self) -> CellVec {
        match self {
            Direction::Up => CellVec::new(0, -1),
            Direction::Down => CellVec::new(0, 1),
            Direction::Left => CellVec::new(-1, 0),
            Direction::Right => CellVec::new(1, 0),
        }
    }
}
