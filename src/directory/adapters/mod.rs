//! Adapter implementations for staff directory ports.

pub mod memory;
pub mod postgres;
