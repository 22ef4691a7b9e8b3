//! Adapter implementations of the notifier port.

pub mod logging;
pub mod memory;
