//! Application services for notification rendering and delivery.

mod dispatcher;

pub use dispatcher::{NotificationDispatcher, render};
