use crate::cli::RunArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use lifelab::core::models::geometry::CellVec;
use lifelab::engine::driver::SpeedTier;
use lifelab::workflows::run::Placement;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

const DEFAULT_GRID_ROWS: usize = 80;
const DEFAULT_GRID_COLS: usize = 80;
const DEFAULT_GENERATIONS: u64 = 100;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialGridSection {
    rows: Option<usize>,
    cols: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialSimulationSection {
    generations: Option<u64>,
    speed: Option<SpeedTier>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
struct ScenarioPattern {
    category: String,
    name: String,
    /// Top-left corner of the pattern as `[x, y]` cell coordinates.
    position: [i32; 2],
}

impl From<ScenarioPattern> for Placement {
    fn from(p: ScenarioPattern) -> Self {
        Self {
            category: p.category,
            name: p.name,
            position: CellVec::new(p.position[0], p.position[1]),
        }
    }
}

/// A scenario file as written on disk, before CLI overrides are applied.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialScenario {
    grid: Option<PartialGridSection>,
    simulation: Option<PartialSimulationSection>,
    #[serde(default, rename = "pattern")]
    patterns: Vec<ScenarioPattern>,
}

/// The fully resolved inputs for a `run` invocation.
#[derive(Debug)]
pub struct RunPlan {
    pub rows: usize,
    pub cols: usize,
    pub generations: u64,
    pub speed: SpeedTier,
    pub placements: Vec<Placement>,
}

impl PartialScenario {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading scenario from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Merges the scenario with CLI arguments. CLI values win; placements
    /// given on the command line are appended after the scenario's own.
    pub fn merge_with_cli(mut self, args: &RunArgs) -> Result<RunPlan> {
        let grid = self.grid.take().unwrap_or_default();
        let simulation = self.simulation.take().unwrap_or_default();

        let rows = args.rows.or(grid.rows).unwrap_or(DEFAULT_GRID_ROWS);
        let cols = args.cols.or(grid.cols).unwrap_or(DEFAULT_GRID_COLS);
        if rows == 0 || cols == 0 {
            return Err(CliError::Config(format!(
                "Grid dimensions must be positive, got {}x{}.",
                rows, cols
            )));
        }

        let generations = args
            .generations
            .or(simulation.generations)
            .unwrap_or(DEFAULT_GENERATIONS);

        let speed = args
            .speed
            .map(Into::into)
            .or(simulation.speed)
            .unwrap_or_default();

        let mut placements: Vec<Placement> =
            self.patterns.into_iter().map(Into::into).collect();
        for spec in &args.patterns {
            let placement = parser::parse_placement(spec)
                .map_err(|e| CliError::Argument(e.to_string()))?;
            placements.push(placement);
        }

        Ok(RunPlan {
            rows,
            cols,
            generations,
            speed,
            placements,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn parse_run_args(args: &[&str]) -> RunArgs {
        let mut full = vec!["lifelab", "run"];
        full.extend_from_slice(args);
        match Cli::parse_from(full).command {
            crate::cli::Commands::Run(run_args) => run_args,
            _ => panic!("Expected 'run' subcommand"),
        }
    }

    fn write_scenario(dir: &Path, content: &str) -> PathBuf {
        let file_path = dir.join("scenario.toml");
        fs::write(&file_path, content).unwrap();
        file_path
    }

    #[test]
    fn empty_scenario_resolves_to_defaults() {
        let args = parse_run_args(&[]);
        let plan = PartialScenario::default().merge_with_cli(&args).unwrap();

        assert_eq!(plan.rows, DEFAULT_GRID_ROWS);
        assert_eq!(plan.cols, DEFAULT_GRID_COLS);
        assert_eq!(plan.generations, DEFAULT_GENERATIONS);
        assert_eq!(plan.speed, SpeedTier::Normal);
        assert!(plan.placements.is_empty());
    }

    #[test]
    fn scenario_file_values_are_used() {
        let dir = tempdir().unwrap();
        let path = write_scenario(
            dir.path(),
            r#"
            [grid]
            rows = 40
            cols = 60

            [simulation]
            generations = 25
            speed = "fast"

            [[pattern]]
            category = "spaceships"
            name = "glider"
            position = [3, 4]
            "#,
        );

        let args = parse_run_args(&[]);
        let plan = PartialScenario::from_file(&path)
            .unwrap()
            .merge_with_cli(&args)
            .unwrap();

        assert_eq!(plan.rows, 40);
        assert_eq!(plan.cols, 60);
        assert_eq!(plan.generations, 25);
        assert_eq!(plan.speed, SpeedTier::Fast);
        assert_eq!(plan.placements.len(), 1);
        assert_eq!(plan.placements[0].category, "spaceships");
        assert_eq!(plan.placements[0].name, "glider");
        assert_eq!(plan.placements[0].position, CellVec::new(3, 4));
    }

    #[test]
    fn cli_args_override_scenario_values() {
        let dir = tempdir().unwrap();
        let path = write_scenario(
            dir.path(),
            r#"
            [grid]
            rows = 40

            [simulation]
            generations = 25
            speed = "slow"
            "#,
        );

        let args = parse_run_args(&["--rows", "120", "-g", "500", "--speed", "fast"]);
        let plan = PartialScenario::from_file(&path)
            .unwrap()
            .merge_with_cli(&args)
            .unwrap();

        assert_eq!(plan.rows, 120);
        assert_eq!(plan.cols, DEFAULT_GRID_COLS);
        assert_eq!(plan.generations, 500);
        assert_eq!(plan.speed, SpeedTier::Fast);
    }

    #[test]
    fn cli_placements_are_appended_after_scenario_placements() {
        let dir = tempdir().unwrap();
        let path = write_scenario(
            dir.path(),
            r#"
            [[pattern]]
            category = "still_lifes"
            name = "block"
            position = [0, 0]
            "#,
        );

        let args = parse_run_args(&["-p", "oscillators/blinker@10,10"]);
        let plan = PartialScenario::from_file(&path)
            .unwrap()
            .merge_with_cli(&args)
            .unwrap();

        assert_eq!(plan.placements.len(), 2);
        assert_eq!(plan.placements[0].name, "block");
        assert_eq!(plan.placements[1].name, "blinker");
        assert_eq!(plan.placements[1].position, CellVec::new(10, 10));
    }

    #[test]
    fn zero_grid_dimension_is_rejected() {
        let args = parse_run_args(&["--rows", "0"]);
        let result = PartialScenario::default().merge_with_cli(&args);
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn unknown_scenario_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = write_scenario(dir.path(), "frames-per-second = 100\n");

        let result = PartialScenario::from_file(&path);
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }
}
