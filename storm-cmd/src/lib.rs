//! Command implementations for the storm timeline CLI.
//!
//! `analyze` fetches a classification from the server; the remaining
//! subcommands run the timeline engine over a saved response and print CSV.

use clap::{Subcommand, ValueEnum};
use storm_timeline::MergeStrategy;

pub mod analyze;
pub mod export;

/// Span merge strategy as accepted on the command line.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum StrategyArg {
    #[default]
    Sweep,
    SinglePass,
}

impl From<StrategyArg> for MergeStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Sweep => MergeStrategy::Sweep,
            StrategyArg::SinglePass => MergeStrategy::SinglePass,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a storm classification on the server and save the response JSON
    Analyze {
        /// Base URL of the analysis API (e.g. http://localhost:8080/api)
        #[arg(short, long)]
        server: String,

        /// Dataset ids to classify (repeatable)
        #[arg(short, long = "dataset", required = true)]
        datasets: Vec<i64>,

        #[command(flatten)]
        params: analyze::ParamArgs,

        /// Output path for the response JSON
        #[arg(short, long)]
        output: String,
    },

    /// Print merged storm spans (or dry-day spans) as CSV
    Spans {
        /// Saved analysis response JSON
        #[arg(short, long)]
        input: String,

        /// Merge strategy for overlapping events
        #[arg(long, value_enum, default_value_t = StrategyArg::Sweep)]
        strategy: StrategyArg,

        /// Print dry-day spans instead of storm spans
        #[arg(long)]
        dry_days: bool,
    },

    /// Print the storm/dry concurrency series as CSV
    Histogram {
        /// Saved analysis response JSON
        #[arg(short, long)]
        input: String,
    },

    /// Print per-dataset stacked (gap, duration) segments as CSV
    Rows {
        /// Saved analysis response JSON
        #[arg(short, long)]
        input: String,

        /// Minimum bar width in milliseconds
        #[arg(long, default_value_t = storm_timeline::MIN_SEGMENT_MS)]
        min_segment_ms: i64,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Analyze {
            server,
            datasets,
            params,
            output,
        } => analyze::run_analyze(&server, datasets, params.into(), &output).await,
        Command::Spans {
            input,
            strategy,
            dry_days,
        } => export::run_spans(&input, strategy.into(), dry_days),
        Command::Histogram { input } => export::run_histogram(&input),
        Command::Rows {
            input,
            min_segment_ms,
        } => export::run_rows(&input, min_segment_ms),
    }
}
