//! Notifier that writes emails to the tracing log instead of delivering
//! them.

use async_trait::async_trait;
use tracing::info;

use crate::notification::{
    domain::Email,
    ports::{Notifier, NotifierResult},
};

/// Logs each email at `info` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn send(&self, email: &Email) -> NotifierResult<()> {
        info!(to = %email.to, subject = %email.subject, body = %email.body, "email notification");
        Ok(())
    }
}
