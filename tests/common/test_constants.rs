//! Shared constants for integration tests.
//!
//! Integration tests are compiled as separate crates (one per top-level file in
//! `tests/`). Placing shared constants under `tests/common/` avoids creating an
//! additional integration test binary while still allowing reuse via:
//!
//! ```rust
//! #[path = "common/test_constants.rs"]
//! mod test_constants;
//! ```

/// Region used by the behavioural scenarios.
pub const TEST_REGION: &str = "us-east-1";

/// Zone labels inside [`TEST_REGION`].
pub const ZONE_A: &str = "us-east-1a";
/// Second zone label inside [`TEST_REGION`].
pub const ZONE_B: &str = "us-east-1b";
