use super::config::SessionConfig;
use super::driver::{Pacer, SimulationDriver, SpeedTier};
use super::error::EngineError;
use super::grid::GridEngine;
use super::registry::{PatternRegistry, PlacedPattern};
use super::state::Mode;
use crate::core::models::geometry::{CellVec, Direction};
use crate::core::models::grid::Grid;
use crate::core::models::ids::InstanceId;
use crate::core::models::pattern::PatternLibrary;
use std::time::Instant;
use tracing::{debug, info, warn};

/// One interactive sandbox session: the library, the grid engine, the placed
/// pattern registry and the simulation driver, arbitrated by a single
/// interaction mode.
///
/// Commands arrive from a front-end and return whether they had any effect.
/// A command that is not valid for the current mode is a silent no-op; the
/// UI is expected to offer only contextually valid commands, but stale
/// clicks and ids must never crash a session.
///
/// The host loop calls [`Session::tick`] once per frame with the current
/// instant and the currently held directional key; everything time-based
/// (auto-run, hold-to-slide movement) is polled there, never blocked on.
pub struct Session {
    library: PatternLibrary,
    engine: GridEngine,
    registry: PatternRegistry,
    driver: SimulationDriver,
    move_pacer: Pacer,
    mode: Mode,
    /// The browsing mode to restore when a selection is dropped.
    resume: Mode,
    quit_requested: bool,
}

impl Session {
    pub fn new(library: PatternLibrary, config: &SessionConfig) -> Result<Self, EngineError> {
        let engine = GridEngine::new(config.rows, config.cols)?;
        info!(
            "Session opened: {}x{} grid, {} pattern(s) in the library",
            config.rows,
            config.cols,
            library.len()
        );
        Ok(Self {
            library,
            engine,
            registry: PatternRegistry::new(config.rows, config.cols),
            driver: SimulationDriver::new(config.speed),
            move_pacer: Pacer::new(config.move_repeat),
            mode: Mode::CategoryBrowsing,
            resume: Mode::CategoryBrowsing,
            quit_requested: false,
        })
    }

    // --- Command surface -------------------------------------------------

    /// Opens the pattern picker of `category`.
    pub fn choose_category(&mut self, category: &str) -> bool {
        if self.mode != Mode::CategoryBrowsing || !self.library.has_category(category) {
            return false;
        }
        self.set_browse(Mode::PatternBrowsing {
            category: category.to_string(),
        });
        true
    }

    /// Steps the picker back up one level.
    pub fn back(&mut self) -> bool {
        match self.mode.clone() {
            Mode::PatternBrowsing { .. } => {
                self.set_browse(Mode::CategoryBrowsing);
                true
            }
            Mode::Placing { category, .. } => {
                self.set_browse(Mode::PatternBrowsing { category });
                true
            }
            _ => false,
        }
    }

    /// Picks `name` from the currently browsed category.
    pub fn choose_pattern(&mut self, name: &str) -> bool {
        let Mode::PatternBrowsing { category } = &self.mode else {
            return false;
        };
        if self.library.get(category, name).is_none() {
            return false;
        }
        let category = category.clone();
        self.set_browse(Mode::Placing {
            category,
            name: name.to_string(),
        });
        true
    }

    /// Confirms the picked pattern at `pos`.
    ///
    /// Placement mode is sticky: a successful placement drops back to the
    /// pattern picker of the same category so the next instance is one pick
    /// away.
    pub fn place_at(&mut self, pos: CellVec) -> bool {
        let Mode::Placing { category, name } = self.mode.clone() else {
            return false;
        };
        match self.registry.place(&self.library, &category, &name, pos) {
            Ok(_) => {
                self.set_browse(Mode::PatternBrowsing { category });
                true
            }
            Err(e) => {
                warn!("Placement refused: {}", e);
                false
            }
        }
    }

    /// Hit-tests `point` against the placed instances and applies the click
    /// protocol: select on a fresh hit, re-target on a different instance,
    /// deselect when the selected instance is clicked again.
    pub fn select_at(&mut self, point: CellVec) -> bool {
        if self.mode.is_running() {
            return false;
        }
        let Some(hit) = self.registry.hit_test(point) else {
            return false;
        };
        if self.mode == (Mode::IdleWithSelection { id: hit }) {
            return self.deselect();
        }
        if self.registry.select(hit) {
            self.mode = Mode::IdleWithSelection { id: hit };
            true
        } else {
            false
        }
    }

    /// Drops the current selection and restores the picker.
    pub fn deselect(&mut self) -> bool {
        if !matches!(self.mode, Mode::IdleWithSelection { .. }) {
            return false;
        }
        self.registry.deselect();
        self.mode = self.resume.clone();
        true
    }

    /// Nudges the selected instance one cell in `direction`, stopping at the
    /// grid walls.
    pub fn move_selected(&mut self, direction: Direction) -> bool {
        let Mode::IdleWithSelection { id } = self.mode else {
            return false;
        };
        self.registry.move_by(id, direction.unit())
    }

    /// Merges every placed instance into the grid and starts the run.
    /// Irreversible for the session except via [`Session::reset`].
    pub fn commit(&mut self) -> bool {
        if self.mode.is_running() {
            return false;
        }
        self.registry.deselect();
        self.registry.merge_into(&self.library, &mut self.engine);
        self.mode = Mode::Running;
        info!(
            "Run committed at generation {} with population {}",
            self.engine.generation(),
            self.engine.population()
        );
        true
    }

    /// Returns the session to a blank pre-run state.
    pub fn reset(&mut self) -> bool {
        self.engine.reset();
        self.registry.clear();
        self.driver.stop();
        self.mode = Mode::CategoryBrowsing;
        self.resume = Mode::CategoryBrowsing;
        debug!("Session reset");
        true
    }

    /// Fires one manual step, rate-limited by the same interval as auto-run
    /// so a held advance key cannot exceed the configured speed.
    pub fn single_step(&mut self, now: Instant) -> bool {
        if !self.mode.is_running() || !self.driver.try_step(now) {
            return false;
        }
        self.engine.step();
        true
    }

    /// Toggles continuous stepping. Only meaningful while running.
    pub fn toggle_auto_run(&mut self, now: Instant) -> bool {
        if !self.mode.is_running() {
            return false;
        }
        let auto = self.driver.toggle_auto(now);
        debug!("Auto-run {}", if auto { "enabled" } else { "paused" });
        true
    }

    /// Switches the speed preset. Valid in every mode.
    pub fn set_speed(&mut self, tier: SpeedTier) -> bool {
        self.driver.set_tier(tier);
        true
    }

    pub fn quit(&mut self) -> bool {
        self.quit_requested = true;
        true
    }

    pub fn should_quit(&self) -> bool {
        self.quit_requested
    }

    /// One cooperative tick of the session.
    ///
    /// The host loop calls this once per frame with the instant and the
    /// directional key currently held (if any). While running with auto-run
    /// on, at most one paced step fires; before the run, a held key slides
    /// the selected instance one cell per repeat interval. Returns whether
    /// anything changed.
    pub fn tick(&mut self, now: Instant, held: Option<Direction>) -> bool {
        match self.mode {
            Mode::Running => {
                if self.driver.auto() && self.driver.try_step(now) {
                    self.engine.step();
                    true
                } else {
                    false
                }
            }
            Mode::IdleWithSelection { id } => match held {
                Some(direction) if self.move_pacer.ready(now) => {
                    self.registry.move_by(id, direction.unit())
                }
                _ => false,
            },
            _ => false,
        }
    }

    // --- Read accessors for the presentation layer -----------------------

    pub fn grid(&self) -> &Grid {
        self.engine.grid()
    }

    pub fn generation(&self) -> u64 {
        self.engine.generation()
    }

    pub fn population(&self) -> usize {
        self.engine.population()
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn instances(&self) -> impl Iterator<Item = (InstanceId, &PlacedPattern)> {
        self.registry.iter()
    }

    pub fn selected(&self) -> Option<InstanceId> {
        self.registry.selected()
    }

    pub fn auto_run(&self) -> bool {
        self.driver.auto()
    }

    pub fn speed(&self) -> SpeedTier {
        self.driver.tier()
    }

    pub fn library(&self) -> &PatternLibrary {
        &self.library
    }

    /// Remembers the current picker position so a later deselect can land
    /// back where the user left off.
    fn set_browse(&mut self, mode: Mode) {
        self.resume = mode.clone();
        self.mode = mode;
    }
}
