//! # lifelab Core Library
//!
//! The simulation core of an interactive Game of Life sandbox: the cell grid
//! and its step function, the registry of user-placed pattern instances, and
//! the finite-state protocol that turns pointer and key events into pattern
//! placement, selection, movement and a committed, running simulation.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a
//! clear separation of concerns, making it modular, testable and extensible.
//!
//! - **[`core`]: The Foundation.** Contains stateless data models (`Grid`,
//!   `PatternTemplate`, `PatternLibrary`), cell-space geometry, and I/O
//!   utilities for loading pattern libraries from TOML.
//!
//! - **[`engine`]: The Logic Core.** This stateful layer owns a run of the
//!   sandbox: the `GridEngine` hot path, the `PatternRegistry` of placed but
//!   uncommitted instances, the `Session` state machine arbitrating commands,
//!   and the `SimulationDriver` pacing logic.
//!
//! - **[`workflows`]: The Public API.** The highest-level, user-facing layer.
//!   It ties the `engine` and `core` together to execute complete scripted
//!   runs: place a list of patterns, commit them, and advance the simulation
//!   a fixed number of generations while collecting statistics.
//!
//! Presentation is deliberately out of scope. A renderer polls the read
//! accessors on [`engine::session::Session`]; the core never pushes.

pub mod core;
pub mod engine;
pub mod workflows;
