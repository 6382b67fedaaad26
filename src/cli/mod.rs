//! Command-line interface definitions for the `volsweep` binary.
//!
//! This module centralises the clap parser structures so both the main binary
//! and the build script can reuse them when generating the manual page.

use clap::{Args, Parser};

/// Top-level CLI for the `volsweep` binary.
#[derive(Debug, Parser)]
#[command(
    name = "volsweep",
    about = "Find and delete EBS volumes that are not attached to any instance",
    arg_required_else_help = true
)]
pub(crate) enum Cli {
    /// Report unattached volumes without deleting anything.
    #[command(name = "list", about = "Report unattached volumes without deleting anything")]
    List(TargetArgs),
    /// Report unattached volumes and delete them after confirmation.
    #[command(
        name = "sweep",
        about = "Report unattached volumes and delete them after confirmation"
    )]
    Sweep(SweepCommand),
}

/// Options shared by every subcommand. Each overrides the matching
/// `volsweep.toml` key or `VOLSWEEP_*` variable.
#[derive(Debug, Args)]
pub(crate) struct TargetArgs {
    /// Region to sweep (for example `eu-west-1`).
    #[arg(long, value_name = "REGION")]
    pub(crate) region: Option<String>,
    /// Only select volumes of exactly this size in GiB.
    #[arg(long, value_name = "GIB", value_parser = clap::value_parser!(u32).range(1..))]
    pub(crate) size: Option<u32>,
    /// Path to the `aws` CLI binary.
    #[arg(long, value_name = "PATH")]
    pub(crate) aws_bin: Option<String>,
    /// Named profile from the `aws` credential chain.
    #[arg(long, value_name = "NAME")]
    pub(crate) profile: Option<String>,
}

/// Arguments for the `volsweep sweep` subcommand.
#[derive(Debug, Args)]
pub(crate) struct SweepCommand {
    #[command(flatten)]
    pub(crate) target: TargetArgs,
    /// Delete without asking for confirmation.
    #[arg(long, short = 'y')]
    pub(crate) yes: bool,
}
