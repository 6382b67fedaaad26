//! BDD scenarios for the volume sweep.

use rstest_bdd_macros::scenario;

use super::test_helpers::{SweepContext, sweep_context};

#[scenario(
    path = "tests/features/sweep.feature",
    name = "Size filter deletes only the matching volume"
)]
fn scenario_size_filter(sweep_context: SweepContext) {
    let _ = sweep_context;
}

#[scenario(
    path = "tests/features/sweep.feature",
    name = "Throttled listing prompts nothing and deletes nothing"
)]
fn scenario_throttled_listing(sweep_context: SweepContext) {
    let _ = sweep_context;
}

#[scenario(
    path = "tests/features/sweep.feature",
    name = "A permission failure does not stop the batch"
)]
fn scenario_permission_failure(sweep_context: SweepContext) {
    let _ = sweep_context;
}

#[scenario(
    path = "tests/features/sweep.feature",
    name = "Anything but yes leaves the volumes alone"
)]
fn scenario_declined(sweep_context: SweepContext) {
    let _ = sweep_context;
}

#[scenario(
    path = "tests/features/sweep.feature",
    name = "An empty inventory never prompts"
)]
fn scenario_empty_inventory(sweep_context: SweepContext) {
    let _ = sweep_context;
}

#[scenario(
    path = "tests/features/sweep.feature",
    name = "Listing reports candidates without deleting"
)]
fn scenario_list_only(sweep_context: SweepContext) {
    let _ = sweep_context;
}
