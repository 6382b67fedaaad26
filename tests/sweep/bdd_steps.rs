//! BDD step definitions for sweep behaviour.

use rstest_bdd_macros::{given, then, when};
use volsweep::test_support::{ScriptedConfirmation, json_volumes};
use volsweep::{SweepError, SweepOutcome};

use super::test_helpers::{RunResult, SweepContext, build_sweeper, delete_targets, into_report};
use crate::test_constants::{ZONE_A, ZONE_B};

#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("assertion failed: {0}")]
    Assertion(String),
}

fn check(condition: bool, message: impl FnOnce() -> String) -> Result<(), StepError> {
    if condition {
        Ok(())
    } else {
        Err(StepError::Assertion(message()))
    }
}

#[given("a sweep in region \"{region}\"")]
fn sweep_in_region(mut sweep_context: SweepContext, region: String) -> SweepContext {
    sweep_context.config.region = region.trim().to_owned();
    sweep_context
}

#[given("a size filter of {size:u32} GiB")]
fn size_filter(mut sweep_context: SweepContext, size: u32) -> SweepContext {
    sweep_context.config.size_filter_gib = Some(size);
    sweep_context
}

#[given("the AWS CLI lists vol-1 of 10 GiB and vol-2 of 20 GiB")]
fn aws_lists_two_volumes(sweep_context: SweepContext) -> SweepContext {
    sweep_context.runner.push_output(
        Some(0),
        json_volumes(&[("vol-1", 10, ZONE_A), ("vol-2", 20, ZONE_B)]),
        "",
    );
    sweep_context
}

#[given("the AWS CLI lists no volumes")]
fn aws_lists_nothing(sweep_context: SweepContext) -> SweepContext {
    sweep_context
        .runner
        .push_output(Some(0), json_volumes(&[]), "");
    sweep_context
}

#[given("the AWS CLI throttles the volume listing")]
fn aws_throttles_listing(sweep_context: SweepContext) -> SweepContext {
    sweep_context.runner.push_api_error(
        "RequestLimitExceeded",
        "DescribeVolumes",
        "Request limit exceeded.",
    );
    sweep_context
}

#[given("the next deletion succeeds")]
fn next_deletion_succeeds(sweep_context: SweepContext) -> SweepContext {
    sweep_context.runner.push_success();
    sweep_context
}

#[given("the next deletion is unauthorized")]
fn next_deletion_unauthorized(sweep_context: SweepContext) -> SweepContext {
    sweep_context.runner.push_api_error(
        "UnauthorizedOperation",
        "DeleteVolume",
        "You are not authorized to perform this operation.",
    );
    sweep_context
}

#[given("the operator answers \"{reply}\"")]
fn operator_answers(mut sweep_context: SweepContext, reply: String) -> SweepContext {
    sweep_context.gate = ScriptedConfirmation::replying(reply);
    sweep_context
}

#[when("I run the sweep")]
fn run_sweep(mut sweep_context: SweepContext) -> SweepContext {
    let mut sweeper = build_sweeper(&sweep_context);
    let result = match sweeper.run(&mut sweep_context.gate) {
        Ok(outcome) => RunResult::Finished(outcome),
        Err(err) => RunResult::Failed {
            throttling: matches!(&err, SweepError::Provider(provider) if provider.is_throttling()),
            message: err.to_string(),
        },
    };
    sweep_context.result = Some(result);
    sweep_context.report = into_report(sweeper);
    sweep_context
}

#[when("I list the volumes")]
fn list_volumes(mut sweep_context: SweepContext) -> SweepContext {
    let mut sweeper = build_sweeper(&sweep_context);
    let listing = sweeper
        .list()
        .unwrap_or_else(|err| panic!("listing should succeed: {err}"));
    sweep_context.result = Some(RunResult::Listed(listing));
    sweep_context.report = into_report(sweeper);
    sweep_context
}

#[then("only volume \"{volume_id}\" is deleted")]
fn only_volume_deleted(sweep_context: &SweepContext, volume_id: String) -> Result<(), StepError> {
    let deleted = delete_targets(&sweep_context.runner);
    check(deleted == [volume_id.trim()], || {
        format!("expected only {volume_id} to be deleted, got {deleted:?}")
    })
}

#[then("delete calls are issued for vol-1 then vol-2")]
fn deletes_both_in_order(sweep_context: &SweepContext) -> Result<(), StepError> {
    let deleted = delete_targets(&sweep_context.runner);
    check(deleted == ["vol-1", "vol-2"], || {
        format!("expected vol-1 then vol-2, got {deleted:?}")
    })
}

#[then("no volume is deleted")]
fn no_volume_deleted(sweep_context: &SweepContext) -> Result<(), StepError> {
    let deleted = delete_targets(&sweep_context.runner);
    check(deleted.is_empty(), || {
        format!("expected no delete calls, got {deleted:?}")
    })
}

#[then("the operator is never prompted")]
fn never_prompted(sweep_context: &SweepContext) -> Result<(), StepError> {
    let prompts = sweep_context.gate.prompts();
    check(prompts.is_empty(), || {
        format!("expected no prompt, got {prompts:?}")
    })
}

#[then("the sweep fails with a throttling error")]
fn fails_with_throttling(sweep_context: &SweepContext) -> Result<(), StepError> {
    match &sweep_context.result {
        Some(RunResult::Failed { throttling: true, .. }) => Ok(()),
        other => Err(StepError::Assertion(format!(
            "expected a throttling failure, got {other:?}"
        ))),
    }
}

#[then("the sweep completes with {deleted:u32} deleted and {failed:u32} failed")]
fn completes_with_counts(
    sweep_context: &SweepContext,
    deleted: u32,
    failed: u32,
) -> Result<(), StepError> {
    let Some(RunResult::Finished(SweepOutcome::Completed(summary))) = &sweep_context.result else {
        return Err(StepError::Assertion(format!(
            "expected a completed sweep, got {:?}",
            sweep_context.result
        )));
    };
    check(
        summary.succeeded() == deleted as usize && summary.failed_count() == failed as usize,
        || format!("expected {deleted} deleted and {failed} failed, got {summary:?}"),
    )
}

#[then("the sweep is declined")]
fn sweep_declined(sweep_context: &SweepContext) -> Result<(), StepError> {
    check(
        matches!(
            sweep_context.result,
            Some(RunResult::Finished(SweepOutcome::Declined { .. }))
        ),
        || format!("expected a declined sweep, got {:?}", sweep_context.result),
    )
}

#[then("the listing holds vol-1 then vol-2")]
fn listing_holds_both(sweep_context: &SweepContext) -> Result<(), StepError> {
    let Some(RunResult::Listed(listing)) = &sweep_context.result else {
        return Err(StepError::Assertion(format!(
            "expected a listing, got {:?}",
            sweep_context.result
        )));
    };
    let ids = listing
        .volumes()
        .iter()
        .map(|volume| volume.id.as_str())
        .collect::<Vec<_>>();
    check(ids == ["vol-1", "vol-2"], || {
        format!("expected vol-1 then vol-2, got {ids:?}")
    })
}

#[then("the report mentions \"{text}\"")]
fn report_mentions(sweep_context: &SweepContext, text: String) -> Result<(), StepError> {
    check(sweep_context.report.contains(text.as_str()), || {
        format!("expected report to mention {text:?}:\n{}", sweep_context.report)
    })
}

#[then("the report does not mention \"{text}\"")]
fn report_omits(sweep_context: &SweepContext, text: String) -> Result<(), StepError> {
    check(!sweep_context.report.contains(text.as_str()), || {
        format!("expected report to omit {text:?}:\n{}", sweep_context.report)
    })
}

#[then("the report ends with \"{text}\"")]
fn report_ends_with(sweep_context: &SweepContext, text: String) -> Result<(), StepError> {
    check(sweep_context.report.trim_end().ends_with(text.as_str()), || {
        format!("expected report to end with {text:?}:\n{}", sweep_context.report)
    })
}
