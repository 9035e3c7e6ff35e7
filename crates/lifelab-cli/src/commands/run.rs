use crate::cli::RunArgs;
use crate::config::{PartialScenario, RunPlan};
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use lifelab::core::io::library::load_library;
use lifelab::core::models::grid::Grid;
use lifelab::core::models::pattern::PatternLibrary;
use lifelab::engine::config::SessionConfigBuilder;
use lifelab::engine::progress::ProgressReporter;
use lifelab::engine::session::Session;
use lifelab::engine::state::Mode;
use lifelab::workflows;
use lifelab::workflows::run::{RunConfig, RunResult};
use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::info;

pub fn run(args: RunArgs) -> Result<()> {
    let library = match &args.library {
        Some(path) => {
            info!("Loading pattern library from {:?}", path);
            load_library(path)?
        }
        None => PatternLibrary::builtin(),
    };

    let scenario = match &args.scenario {
        Some(path) => PartialScenario::from_file(path)?,
        None => PartialScenario::default(),
    };
    let plan = scenario.merge_with_cli(&args)?;
    info!(
        "Resolved run: {}x{} grid, {} generation(s), {} placement(s)",
        plan.rows,
        plan.cols,
        plan.generations,
        plan.placements.len()
    );

    if args.watch {
        run_watched(library, &plan)
    } else {
        run_headless(&library, &plan, args.report.as_deref())
    }
}

fn run_headless(library: &PatternLibrary, plan: &RunPlan, report: Option<&Path>) -> Result<()> {
    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let config = RunConfig {
        rows: plan.rows,
        cols: plan.cols,
        generations: plan.generations,
    };
    let result = workflows::run::run(library, &config, &plan.placements, &reporter)?;

    let final_stats = result.final_stats();
    println!(
        "Run complete: generation {}, population {}.",
        final_stats.generation, final_stats.population
    );

    if let Some(path) = report {
        write_report(path, &result)?;
        println!("Population history written to {}.", path.display());
    }
    Ok(())
}

fn write_report(path: &Path, result: &RunResult) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["generation", "population"])?;
    for stats in &result.history {
        writer.write_record([stats.generation.to_string(), stats.population.to_string()])?;
    }
    writer.flush()?;
    info!(
        "Wrote {} history record(s) to {:?}",
        result.history.len(),
        path
    );
    Ok(())
}

/// Drives the interactive session through its command surface and renders
/// each generation to the terminal, paced by the configured speed preset.
fn run_watched(library: PatternLibrary, plan: &RunPlan) -> Result<()> {
    let config = SessionConfigBuilder::new()
        .rows(plan.rows)
        .cols(plan.cols)
        .speed(plan.speed)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;
    let mut session = Session::new(library, &config)?;

    for placement in &plan.placements {
        if !matches!(session.mode(), Mode::CategoryBrowsing) {
            session.back();
        }
        let accepted = session.choose_category(&placement.category)
            && session.choose_pattern(&placement.name)
            && session.place_at(placement.position);
        if !accepted {
            return Err(CliError::Argument(format!(
                "Placement '{}/{}' at ({}, {}) was refused.",
                placement.category,
                placement.name,
                placement.position.x,
                placement.position.y
            )));
        }
    }

    session.commit();
    session.toggle_auto_run(Instant::now());

    let stdout = std::io::stdout();
    render_frame(&stdout, session.grid(), session.generation(), session.population())?;

    while session.generation() < plan.generations {
        if session.tick(Instant::now(), None) {
            render_frame(
                &stdout,
                session.grid(),
                session.generation(),
                session.population(),
            )?;
        } else {
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    println!(
        "Run complete: generation {}, population {}.",
        session.generation(),
        session.population()
    );
    Ok(())
}

fn render_frame(
    stdout: &std::io::Stdout,
    grid: &Grid,
    generation: u64,
    population: usize,
) -> Result<()> {
    let mut out = stdout.lock();
    // Clear the screen and home the cursor.
    write!(out, "\x1B[2J\x1B[H")?;
    let mut line = String::with_capacity(grid.cols() + 1);
    for row in 0..grid.rows() {
        line.clear();
        for col in 0..grid.cols() {
            line.push(if grid.is_alive(row as i64, col as i64) {
                '#'
            } else {
                '.'
            });
        }
        writeln!(out, "{}", line)?;
    }
    writeln!(out, "generation {}  population {}", generation, population)?;
    out.flush()?;
    Ok(())
}
