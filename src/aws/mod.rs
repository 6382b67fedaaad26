//! EC2 volume inventory backed by the `aws` CLI.
//!
//! Credentials, profiles and endpoints are resolved by the CLI's own
//! credential chain. This module only builds argument vectors, runs them
//! through a [`CommandRunner`] and interprets the JSON or stderr it gets back.

mod error;
mod types;

use std::ffi::OsString;

use tracing::{debug, warn};

use crate::command::{CommandOutput, CommandRunner, ProcessCommandRunner};
use crate::config::SweepConfig;
use crate::volume::{AVAILABLE_STATUS, Volume, VolumeInventory};

pub use error::ProviderError;
use error::parse_api_error;
use types::DescribeVolumesOutput;

/// Default `aws` CLI binary name.
pub const DEFAULT_AWS_BIN: &str = "aws";

/// [`VolumeInventory`] that shells out to `aws ec2`.
#[derive(Clone, Debug)]
pub struct AwsCliInventory<R: CommandRunner> {
    aws_bin: String,
    profile: Option<String>,
    runner: R,
}

impl AwsCliInventory<ProcessCommandRunner> {
    /// Creates an inventory wired to the real process runner.
    #[must_use]
    pub fn with_process_runner(config: &SweepConfig) -> Self {
        Self::new(
            config.aws_bin.clone(),
            config.profile.clone(),
            ProcessCommandRunner,
        )
    }
}

impl<R: CommandRunner> AwsCliInventory<R> {
    /// Creates an inventory using the given binary, optional named profile
    /// and runner.
    #[must_use]
    pub fn new(aws_bin: impl Into<String>, profile: Option<String>, runner: R) -> Self {
        Self {
            aws_bin: aws_bin.into().trim().to_owned(),
            profile: profile.map(|name| name.trim().to_owned()),
            runner,
        }
    }

    /// Returns the runner, mainly so tests can inspect recorded calls.
    #[must_use]
    pub const fn runner(&self) -> &R {
        &self.runner
    }

    /// Builds the argument vector for an `aws ec2 <operation>` call.
    fn build_args(&self, operation: &str, region: &str, extra: &[String]) -> Vec<OsString> {
        let mut args = vec![
            OsString::from("ec2"),
            OsString::from(operation),
            OsString::from("--region"),
            OsString::from(region),
        ];

        for arg in extra {
            args.push(OsString::from(arg));
        }

        if let Some(profile) = &self.profile {
            args.push(OsString::from("--profile"));
            args.push(OsString::from(profile));
        }

        args
    }

    fn run_aws(&self, operation: &str, args: &[OsString]) -> Result<CommandOutput, ProviderError> {
        let output = self.runner.run(&self.aws_bin, args)?;
        self.check_output(operation, output)
    }

    /// Checks command output and converts failure to [`ProviderError`].
    fn check_output(
        &self,
        operation: &str,
        output: CommandOutput,
    ) -> Result<CommandOutput, ProviderError> {
        if output.is_success() {
            return Ok(output);
        }

        let err = match parse_api_error(&output.stderr) {
            Some((code, message)) => ProviderError::Api {
                operation: operation.to_owned(),
                code,
                message,
            },
            None => ProviderError::CommandFailure {
                program: self.aws_bin.clone(),
                status: output.code,
                status_text: output.status_text(),
                stderr: output.stderr.trim().to_owned(),
            },
        };
        warn!(
            event = "volsweep.aws.call_failed",
            operation = operation,
            throttled = err.is_throttling(),
            error = %err,
        );
        Err(err)
    }
}

impl<R: CommandRunner> VolumeInventory for AwsCliInventory<R> {
    type Error = ProviderError;

    fn list_available(&self, region: &str) -> Result<Vec<Volume>, Self::Error> {
        let args = self.build_args(
            "describe-volumes",
            region,
            &[
                String::from("--filters"),
                format!("Name=status,Values={AVAILABLE_STATUS}"),
                String::from("--output"),
                String::from("json"),
            ],
        );
        let output = self.run_aws("describe-volumes", &args)?;
        let parsed = serde_json::from_str::<DescribeVolumesOutput>(&output.stdout).map_err(
            |err| ProviderError::Parse {
                resource: String::from("volumes"),
                message: err.to_string(),
            },
        )?;
        debug!(
            event = "volsweep.aws.volumes_listed",
            region = region,
            count = parsed.volumes.len(),
        );
        Ok(parsed.volumes.into_iter().map(Volume::from).collect())
    }

    fn delete_volume(&self, region: &str, volume_id: &str) -> Result<(), Self::Error> {
        let args = self.build_args(
            "delete-volume",
            region,
            &[String::from("--volume-id"), volume_id.to_owned()],
        );
        self.run_aws("delete-volume", &args)?;
        debug!(
            event = "volsweep.aws.volume_deleted",
            region = region,
            volume_id = volume_id,
        );
        Ok(())
    }
}
