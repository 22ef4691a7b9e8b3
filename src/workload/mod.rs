//! Workload thresholds and the workload evaluator.
//!
//! The evaluator sums the weightage of the task forces each staff member is
//! involved in and classifies the total against the configured thresholds.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
