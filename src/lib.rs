//! Core library for the `volsweep` orphaned-volume cleaner.
//!
//! The crate lists EBS volumes that are provisioned but attached to nothing,
//! reports them, and deletes them once an operator agrees. Provider access
//! sits behind [`VolumeInventory`] with an implementation that drives the
//! `aws` CLI, so credentials come from the CLI's usual resolution chain.

pub mod aws;
pub mod command;
pub mod config;
pub mod confirm;
pub mod report;
pub mod sweep;
pub mod test_support;
pub mod volume;

pub use aws::{AwsCliInventory, DEFAULT_AWS_BIN, ProviderError};
pub use command::{CommandError, CommandOutput, CommandRunner, ProcessCommandRunner};
pub use config::{ConfigError, DEFAULT_REGION, SweepConfig};
pub use confirm::{Confirmation, ConsoleConfirmation, DELETE_PROMPT, is_affirmative};
pub use report::Reporter;
pub use sweep::{
    DeletionFailure, DeletionSummary, Listing, SweepError, SweepOutcome, Sweeper, delete_volumes,
    list_orphaned,
};
pub use volume::{AVAILABLE_STATUS, Volume, VolumeInventory};
