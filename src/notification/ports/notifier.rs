//! Notification delivery port.

use crate::notification::domain::Email;
use async_trait::async_trait;
use thiserror::Error;

/// Result type for notification delivery.
pub type NotifierResult<T> = Result<T, NotifierError>;

/// Errors reported by notification transports.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotifierError {
    /// The transport could not deliver the message.
    #[error("failed to deliver email to {recipient}: {reason}")]
    Delivery {
        /// Recipient address.
        recipient: String,
        /// Transport-specific failure description.
        reason: String,
    },
    /// The transport is unavailable.
    #[error("notification transport unavailable: {0}")]
    Unavailable(String),
}

/// Outgoing email transport.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends one email.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError`] when the message cannot be delivered.
    async fn send(&self, email: &Email) -> NotifierResult<()>;
}
