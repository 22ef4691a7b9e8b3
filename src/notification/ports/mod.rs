//! Port contracts for notification delivery.

mod notifier;

pub use notifier::{Notifier, NotifierError, NotifierResult};
