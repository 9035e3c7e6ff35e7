//! High-level entry points tying the engine and core layers together.

pub mod run;
