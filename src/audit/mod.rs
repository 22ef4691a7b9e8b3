//! Append-only audit trail.
//!
//! Services record who performed each state change, on which record, and
//! from which client address. The trail can be listed or exported as CSV.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
