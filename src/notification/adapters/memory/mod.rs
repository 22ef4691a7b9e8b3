//! In-memory outbox for tests and local tooling.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::notification::{
    domain::Email,
    ports::{Notifier, NotifierError, NotifierResult},
};

/// Notifier that keeps every sent email in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOutbox {
    sent: Arc<RwLock<Vec<Email>>>,
}

impl InMemoryOutbox {
    /// Creates an empty outbox.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the emails sent so far, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError::Unavailable`] when the outbox lock is
    /// poisoned.
    pub fn sent(&self) -> NotifierResult<Vec<Email>> {
        let sent = self
            .sent
            .read()
            .map_err(|err| NotifierError::Unavailable(err.to_string()))?;
        Ok(sent.clone())
    }
}

#[async_trait]
impl Notifier for InMemoryOutbox {
    async fn send(&self, email: &Email) -> NotifierResult<()> {
        let mut sent = self
            .sent
            .write()
            .map_err(|err| NotifierError::Unavailable(err.to_string()))?;
        sent.push(email.clone());
        Ok(())
    }
}
