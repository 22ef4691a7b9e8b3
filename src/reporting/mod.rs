//! Read-only workload reports for TFMS dashboards and tooling.
//!
//! - Query and report types in [`domain`]
//! - Report assembly in [`services`]

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
