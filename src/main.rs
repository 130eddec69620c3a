mod codes;
mod input;
mod logging;
mod model;
mod pipeline;
mod report;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;

use crate::input::{InputError, load_batch};
use crate::logging::init_logging;
use crate::pipeline::stage3_identity::MissingIdPolicy;
use crate::pipeline::stage6_report::{
    ReportError, RunMode, Stage6Input, resolve_output_dir, write_reports,
};
use crate::pipeline::{DEFAULT_PARALLEL_THRESHOLD, PipelineOptions, run_batch};
use crate::report::{Filters, build_summary};

#[derive(Debug, Parser)]
#[command(name = "afplab-linelist", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Classify AFPLAB specimen CSVs and select the WPV1 linelist.
    Run(RunArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MissingIdArg {
    Isolate,
    Legacy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RunModeArg {
    Standalone,
    Pipeline,
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Input CSV files (.csv or .csv.gz), concatenated in the order given.
    #[arg(long = "input", required = true, num_args = 1..)]
    inputs: Vec<PathBuf>,

    #[arg(long = "out")]
    out_dir: PathBuf,

    /// Restrict the dashboard summary to these provinces.
    #[arg(long = "province")]
    provinces: Vec<String>,

    /// Restrict the dashboard summary to these years (e.g. 2021).
    #[arg(long = "year")]
    years: Vec<String>,

    /// How records without an IDCODE are grouped into cases.
    #[arg(long = "missing-id", value_enum, default_value_t = MissingIdArg::Isolate)]
    missing_id: MissingIdArg,

    /// Batch size from which records are classified in parallel (0 disables).
    #[arg(long, default_value_t = DEFAULT_PARALLEL_THRESHOLD)]
    parallel_threshold: usize,

    #[arg(long = "run-mode", value_enum, default_value_t = RunModeArg::Standalone)]
    run_mode: RunModeArg,

    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Debug, Clone)]
struct RunConfig {
    inputs: Vec<PathBuf>,
    out_dir: PathBuf,
    filters: Filters,
    pipeline: PipelineOptions,
    run_mode: RunMode,
    log_level: String,
}

impl From<RunArgs> for RunConfig {
    fn from(args: RunArgs) -> Self {
        Self {
            inputs: args.inputs,
            out_dir: args.out_dir,
            filters: Filters {
                provinces: args.provinces,
                years: args.years,
            },
            pipeline: PipelineOptions {
                missing_id: match args.missing_id {
                    MissingIdArg::Isolate => MissingIdPolicy::Isolate,
                    MissingIdArg::Legacy => MissingIdPolicy::Legacy,
                },
                parallel_threshold: args.parallel_threshold,
            },
            run_mode: match args.run_mode {
                RunModeArg::Standalone => RunMode::Standalone,
                RunModeArg::Pipeline => RunMode::Pipeline,
            },
            log_level: args.log_level,
        }
    }
}

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Report(#[from] ReportError),
}

fn main() {
    let cli = Cli::parse();
    let Command::Run(args) = cli.command;
    let config = RunConfig::from(args);

    if let Err(err) = init_logging(&config.log_level) {
        eprintln!("{err}");
        std::process::exit(1);
    }

    if let Err(err) = run(&config) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(config: &RunConfig) -> Result<(), RunError> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        inputs = config.inputs.len(),
        "starting afplab-linelist"
    );

    let table = load_batch(&config.inputs)?;
    let batch = run_batch(&table, &config.pipeline);
    let summary = build_summary(&table, &batch, &config.filters, &config.pipeline);

    let out_dir = resolve_output_dir(&config.out_dir, config.run_mode);
    write_reports(
        &Stage6Input {
            table: &table,
            batch: &batch,
            summary: &summary,
            run_mode: config.run_mode,
        },
        &out_dir,
    )?;

    tracing::info!(
        wpv1_cases = summary.totals.wpv1_cases,
        linelist_cases = summary.totals.linelist_cases,
        "processing completed"
    );
    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
