//! The scripted headless run: place a list of patterns, commit them, and
//! advance the simulation a fixed number of generations, collecting
//! per-generation statistics. Pacing is an interactive concern and does not
//! apply here; the run advances as fast as the grid engine allows.

use crate::core::models::geometry::CellVec;
use crate::core::models::pattern::PatternLibrary;
use crate::engine::error::EngineError;
use crate::engine::grid::GridEngine;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::registry::PatternRegistry;
use tracing::{info, instrument};

/// One scripted pattern placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub category: String,
    pub name: String,
    pub position: CellVec,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub rows: usize,
    pub cols: usize,
    pub generations: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationStats {
    pub generation: u64,
    pub population: usize,
}

#[derive(Debug, Clone)]
pub struct RunResult {
    /// One entry per generation, starting with the committed initial state
    /// at generation 0.
    pub history: Vec<GenerationStats>,
}

impl RunResult {
    pub fn final_stats(&self) -> GenerationStats {
        // The history always holds at least the generation-0 entry.
        *self
            .history
            .last()
            .expect("run history holds at least the initial entry")
    }
}

#[instrument(skip_all, name = "scripted_run")]
pub fn run(
    library: &PatternLibrary,
    config: &RunConfig,
    placements: &[Placement],
    reporter: &ProgressReporter,
) -> Result<RunResult, EngineError> {
    let mut engine = GridEngine::new(config.rows, config.cols)?;
    let mut registry = PatternRegistry::new(config.rows, config.cols);

    for placement in placements {
        registry.place(
            library,
            &placement.category,
            &placement.name,
            placement.position,
        )?;
    }
    registry.merge_into(library, &mut engine);
    info!(
        "Committed {} placement(s); initial population {}",
        placements.len(),
        engine.population()
    );

    reporter.report(Progress::RunStart {
        total_generations: config.generations,
    });

    let mut history = Vec::with_capacity(config.generations as usize + 1);
    history.push(GenerationStats {
        generation: 0,
        population: engine.population(),
    });

    for _ in 0..config.generations {
        let population = engine.step();
        let generation = engine.generation();
        reporter.report(Progress::Generation {
            generation,
            population,
        });
        history.push(GenerationStats {
            generation,
            population,
        });
    }

    reporter.report(Progress::RunFinish);
    info!(
        "Run complete after {} generation(s); final population {}",
        config.generations,
        engine.population()
    );
    Ok(RunResult { history })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn placement(category: &str, name: &str, x: i32, y: i32) -> Placement {
        Placement {
            category: category.to_string(),
            name: name.to_string(),
            position: CellVec::new(x, y),
        }
    }

    #[test]
    fn history_covers_every_generation() {
        let library = PatternLibrary::builtin();
        let config = RunConfig {
            rows: 20,
            cols: 20,
            generations: 8,
        };
        let placements = [placement("spaceships", "glider", 2, 3)];

        let result = run(&library, &config, &placements, &ProgressReporter::new()).unwrap();
        assert_eq!(result.history.len(), 9);
        assert_eq!(result.history[0].generation, 0);
        assert_eq!(result.final_stats().generation, 8);

        // A glider keeps its 5 cells through every phase.
        assert!(result.history.iter().all(|s| s.population == 5));
    }

    #[test]
    fn still_life_population_is_constant() {
        let library = PatternLibrary::builtin();
        let config = RunConfig {
            rows: 10,
            cols: 10,
            generations: 5,
        };
        let placements = [
            placement("still_lifes", "block", 1, 1),
            placement("still_lifes", "beehive", 5, 5),
        ];

        let result = run(&library, &config, &placements, &ProgressReporter::new()).unwrap();
        assert!(result.history.iter().all(|s| s.population == 10));
    }

    #[test]
    fn bad_placement_aborts_the_run() {
        let library = PatternLibrary::builtin();
        let config = RunConfig {
            rows: 10,
            cols: 10,
            generations: 5,
        };
        let placements = [placement("spaceships", "glider", 40, 40)];

        let result = run(&library, &config, &placements, &ProgressReporter::new());
        assert!(matches!(
            result,
            Err(EngineError::PlacementOutOfBounds { .. })
        ));
    }

    #[test]
    fn reporter_sees_start_every_generation_and_finish() {
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|p| {
            events.lock().unwrap().push(p);
        }));

        let library = PatternLibrary::builtin();
        let config = RunConfig {
            rows: 12,
            cols: 12,
            generations: 3,
        };
        let placements = [placement("oscillators", "blinker", 4, 4)];
        run(&library, &config, &placements, &reporter).unwrap();
        drop(reporter);

        let events = events.into_inner().unwrap();
        assert_eq!(events.len(), 5);
        assert!(matches!(
            events[0],
            Progress::RunStart {
                total_generations: 3
            }
        ));
        assert!(matches!(
            events[2],
            Progress::Generation {
                generation: 2,
                population: 3
            }
        ));
        assert!(matches!(events[4], Progress::RunFinish));
    }
}
