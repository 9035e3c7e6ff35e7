//! Stateless foundation layer: data models and pattern-library I/O.

pub mod io;
pub mod models;
