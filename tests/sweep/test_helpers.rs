//! Shared fixtures and helpers for sweep BDD scenarios.

use rstest::fixture;
use volsweep::test_support::{ScriptedConfirmation, ScriptedRunner};
use volsweep::{
    AwsCliInventory, DEFAULT_AWS_BIN, Listing, ProviderError, SweepConfig, SweepOutcome, Sweeper,
};

use crate::test_constants::TEST_REGION;

pub type ScriptedSweeper = Sweeper<AwsCliInventory<ScriptedRunner>, Vec<u8>>;

#[derive(Clone, Debug)]
pub enum RunResult {
    Listed(Listing),
    Finished(SweepOutcome<ProviderError>),
    Failed { message: String, throttling: bool },
}

#[derive(Clone, Debug)]
pub struct SweepContext {
    pub config: SweepConfig,
    pub runner: ScriptedRunner,
    pub gate: ScriptedConfirmation,
    pub result: Option<RunResult>,
    pub report: String,
}

#[fixture]
pub fn sweep_context() -> SweepContext {
    SweepContext {
        config: SweepConfig::for_region(TEST_REGION),
        runner: ScriptedRunner::new(),
        gate: ScriptedConfirmation::replying("no"),
        result: None,
        report: String::new(),
    }
}

pub fn build_sweeper(context: &SweepContext) -> ScriptedSweeper {
    let inventory = AwsCliInventory::new(DEFAULT_AWS_BIN, None, context.runner.clone());
    Sweeper::new(context.config.clone(), inventory, Vec::new())
        .unwrap_or_else(|err| panic!("sweeper config should be valid: {err}"))
}

pub fn into_report(sweeper: ScriptedSweeper) -> String {
    String::from_utf8(sweeper.into_output()).unwrap_or_else(|err| panic!("utf8 report: {err}"))
}

/// Volume identifiers passed to `aws ec2 delete-volume`, in call order.
pub fn delete_targets(runner: &ScriptedRunner) -> Vec<String> {
    runner
        .invocations()
        .iter()
        .filter(|call| call.args.iter().any(|arg| arg == "delete-volume"))
        .filter_map(|call| {
            call.args
                .iter()
                .skip_while(|arg| *arg != "--volume-id")
                .nth(1)
                .map(|arg| arg.to_string_lossy().into_owned())
        })
        .collect()
}
