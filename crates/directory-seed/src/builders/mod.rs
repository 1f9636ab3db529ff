//! Fluent builder APIs for seed runs.
//!
//! The [`SeedPlan`] runs the OU, group, and user generators over one
//! taxonomy and checks the resulting tables against each other.

mod plan;

pub use plan::{SeedError, SeedPlan, SeedResult, WrittenFiles};
