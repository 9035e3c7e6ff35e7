//! # Engine Module
//!
//! The stateful layer that owns one run of the sandbox. It is organised into
//! submodules matching the moving parts of the system:
//!
//! - **Grid engine** ([`grid`]) - the authoritative cell grid and the
//!   generation step function, the one performance-sensitive hot path
//! - **Pattern registry** ([`registry`]) - the user-placed, not-yet-committed
//!   pattern instances, independent of the grid
//! - **Interaction session** ([`session`], [`state`]) - the finite-state
//!   protocol arbitrating UI commands into placement, selection, movement
//!   and the commit into a running simulation
//! - **Simulation driver** ([`driver`]) - auto-run and single-step pacing
//! - **Configuration** ([`config`]) - session parameters and their builder
//! - **Progress** ([`progress`]) - callback-based reporting for long runs
//! - **Error handling** ([`error`]) - engine-specific error types
//!
//! Everything here assumes the single-threaded cooperative model: one logical
//! tick at a time, no background work between ticks.

pub mod config;
pub mod driver;
pub mod error;
pub mod grid;
pub mod progress;
pub mod registry;
pub mod session;
pub mod state;
