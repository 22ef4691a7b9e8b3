//! Step definitions for workload evaluation scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
