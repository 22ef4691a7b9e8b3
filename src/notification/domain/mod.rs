//! Domain model for outgoing notifications.

mod email;

pub use email::{Email, NotificationKind};
