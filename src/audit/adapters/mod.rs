//! Adapter implementations of the audit log port.

pub mod memory;
pub mod postgres;
