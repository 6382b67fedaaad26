//! Binary entry point for the `volsweep` CLI.

mod cli;

use std::io::{self, Write};
use std::process;

use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use cli::{Cli, SweepCommand, TargetArgs};
use volsweep::{
    AwsCliInventory, ConfigError, ConsoleConfirmation, ProviderError, SweepConfig, SweepError,
    SweepOutcome, Sweeper,
};

/// Exit status when every requested action succeeded.
const EXIT_OK: i32 = 0;
/// Exit status for configuration, listing, or terminal failures.
const EXIT_FAILURE: i32 = 1;
/// Exit status when at least one volume could not be deleted.
const EXIT_PARTIAL: i32 = 2;

const DEFAULT_LOG_FILTER: &str = "error";

#[derive(Debug, Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid value for {field}: must not be blank")]
    InvalidOverride { field: &'static str },
    #[error("AWS inventory call failed: {0}")]
    Provider(#[from] ProviderError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error(
        "terminal I/O failed mid-sweep ({deleted} deleted, {failed} failed): {source}"
    )]
    ReportInterrupted {
        deleted: usize,
        failed: usize,
        source: io::Error,
    },
}

impl From<SweepError<ProviderError>> for CliError {
    fn from(value: SweepError<ProviderError>) -> Self {
        match value {
            SweepError::Provider(err) => Self::Provider(err),
            SweepError::Io(err) => Self::Io(err),
            SweepError::ReportInterrupted { summary, source } => Self::ReportInterrupted {
                deleted: summary.succeeded(),
                failed: summary.failed_count(),
                source,
            },
        }
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let exit_code = match dispatch(cli) {
        Ok(code) => code,
        Err(err) => {
            report_error(&err);
            EXIT_FAILURE
        }
    };

    process::exit(exit_code);
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn dispatch(cli: Cli) -> Result<i32, CliError> {
    match cli {
        Cli::List(target) => run_list(&target),
        Cli::Sweep(command) => run_sweep(&command),
    }
}

fn run_list(target: &TargetArgs) -> Result<i32, CliError> {
    let config = load_config(target)?;
    let inventory = AwsCliInventory::with_process_runner(&config);
    let mut sweeper = Sweeper::new(config, inventory, io::stdout())?;
    sweeper.list()?;
    Ok(EXIT_OK)
}

fn run_sweep(command: &SweepCommand) -> Result<i32, CliError> {
    let mut config = load_config(&command.target)?;
    config.auto_delete = config.auto_delete || command.yes;
    let inventory = AwsCliInventory::with_process_runner(&config);
    let mut sweeper = Sweeper::new(config, inventory, io::stdout())?;
    let mut gate = ConsoleConfirmation::stdio();
    let outcome = sweeper.run(&mut gate)?;
    Ok(exit_code(&outcome))
}

fn load_config(target: &TargetArgs) -> Result<SweepConfig, CliError> {
    let mut config = SweepConfig::load_without_cli_args()?;
    apply_overrides(&mut config, target)?;
    Ok(config)
}

/// Applies CLI flags on top of the file and environment layers.
fn apply_overrides(config: &mut SweepConfig, target: &TargetArgs) -> Result<(), CliError> {
    if let Some(region) = target.region.as_deref() {
        config.region = parse_override("--region", region)?;
    }
    if let Some(aws_bin) = target.aws_bin.as_deref() {
        config.aws_bin = parse_override("--aws-bin", aws_bin)?;
    }
    if let Some(profile) = target.profile.as_deref() {
        config.profile = Some(parse_override("--profile", profile)?);
    }
    if target.size.is_some() {
        config.size_filter_gib = target.size;
    }
    Ok(())
}

fn parse_override(field: &'static str, value: &str) -> Result<String, CliError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CliError::InvalidOverride { field });
    }
    Ok(trimmed.to_owned())
}

fn exit_code<E>(outcome: &SweepOutcome<E>) -> i32 {
    if outcome.is_clean() {
        EXIT_OK
    } else {
        EXIT_PARTIAL
    }
}

fn report_error(err: &CliError) {
    write_error(io::stderr(), err);
}

fn write_error(mut target: impl Write, err: &CliError) {
    writeln!(target, "{err}").ok();
}
