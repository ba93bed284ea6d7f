//! CLI command implementations.

pub mod costs;
pub mod load;
pub mod report;
