//! Behavioural scenarios for the volume sweep.

mod bdd_steps;
mod scenarios;
mod test_helpers;
