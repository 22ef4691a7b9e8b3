//! Adapter implementations of the task force repository port.

pub mod memory;
pub mod postgres;
