use clap::{Args, Parser, Subcommand, ValueEnum};
use lifelab::engine::driver::SpeedTier;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "lifelab - a headless driver for the Game of Life sandbox core: run scripted scenarios and inspect the pattern library.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a scripted scenario: place patterns, commit, and advance the
    /// simulation a number of generations.
    Run(RunArgs),
    /// List the patterns available in the library.
    Patterns(PatternsArgs),
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to a scenario file in TOML format. CLI flags override it.
    #[arg(short, long, value_name = "PATH")]
    pub scenario: Option<PathBuf>,

    /// Path to a custom pattern library in TOML format.
    /// Defaults to the built-in library.
    #[arg(short, long, value_name = "PATH")]
    pub library: Option<PathBuf>,

    /// Override the number of grid rows.
    #[arg(long, value_name = "INT")]
    pub rows: Option<usize>,

    /// Override the number of grid columns.
    #[arg(long, value_name = "INT")]
    pub cols: Option<usize>,

    /// Override the number of generations to simulate.
    #[arg(short, long, value_name = "INT")]
    pub generations: Option<u64>,

    /// Override the speed preset used by watch mode.
    #[arg(long, value_name = "TIER")]
    pub speed: Option<SpeedArg>,

    /// Render the grid to the terminal while the simulation runs, paced at
    /// the configured speed preset.
    #[arg(short, long)]
    pub watch: bool,

    /// Place a pattern, 'category/name@x,y'. Can be used multiple times.
    #[arg(short, long = "pattern", value_name = "SPEC")]
    pub patterns: Vec<String>,

    /// Write the per-generation population history to a CSV file.
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}

/// Arguments for the `patterns` subcommand.
#[derive(Args, Debug)]
pub struct PatternsArgs {
    /// Path to a custom pattern library in TOML format.
    /// Defaults to the built-in library.
    #[arg(short, long, value_name = "PATH")]
    pub library: Option<PathBuf>,
}

/// Speed preset names accepted on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SpeedArg {
    Slow,
    Normal,
    Fast,
}

impl From<SpeedArg> for SpeedTier {
    fn from(arg: SpeedArg) -> Self {
        match arg {
            SpeedArg::Slow => SpeedTier::Slow,
            SpeedArg::Normal => SpeedTier::Normal,
            SpeedArg::Fast => SpeedTier::Fast,
        }
    }
}
