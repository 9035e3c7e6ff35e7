pub mod geometry;
pub mod grid;
pub mod ids;
pub mod pattern;
