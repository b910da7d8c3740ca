use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Ecological flow indices from daily streamflow.
#[derive(Parser)]
#[command(
    name = "eflow",
    version,
    about = "Hydrologic indices of daily streamflow by water year"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Compute indices for every complete water year.
    Compute(ComputeArgs),
    /// Report water-year completeness without computing indices.
    Years(YearsArgs),
}

/// Output column naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConventionArg {
    Canonical,
    Eflowstats,
}

/// Arguments for the `compute` subcommand.
#[derive(clap::Args)]
pub struct ComputeArgs {
    /// Path to input CSV with `datetime` and `q` columns.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path for JSON output (stdout if omitted).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the output naming convention from config.
    #[arg(long, value_enum)]
    pub convention: Option<ConventionArg>,

    /// Only report the Magnificent Seven columns.
    #[arg(long)]
    pub mag7: bool,
}

/// Arguments for the `years` subcommand.
#[derive(clap::Args)]
pub struct YearsArgs {
    /// Path to input CSV with `datetime` and `q` columns.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
