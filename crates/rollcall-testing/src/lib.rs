//! Testing infrastructure for rollcall integration tests.
//!
//! - `TestWorld`: isolated data directory plus CLI invocation
//! - `fixtures`: roster builders in the stored JSON format
//! - `assertions`: checks against `--format json` output

pub mod assertions;
pub mod fixtures;
pub mod world;

pub use fixtures::RosterFixture;
pub use rollcall_engine::ManualClock;
pub use world::{CliResult, TestWorld};
