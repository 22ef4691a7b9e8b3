//! Email notifications for task force lifecycle events.
//!
//! Messages are rendered from `minijinja` templates and handed to a
//! [`ports::Notifier`]. Delivery failures never undo the state change that
//! triggered them.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
