use std::sync::Mutex;

use async_trait::async_trait;
use tracing::info;

use partnerlink_core::CollaboratorError;
use partnerlink_mail::{GroupMailItem, Mailer};

/// Mailer that logs every mail and keeps a copy instead of transmitting it.
#[derive(Debug, Default)]
pub struct LoggingMailer {
    sent: Mutex<Vec<GroupMailItem>>,
}

impl LoggingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every mail sent so far, oldest first.
    pub fn sent(&self) -> Vec<GroupMailItem> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Mailer for LoggingMailer {
    async fn send(&self, title: &str, content: &str, recipients: &[String]) -> Result<(), CollaboratorError> {
        info!(title, recipients = ?recipients, "mail sent");

        self.sent
            .lock()
            .map_err(|_| CollaboratorError::msg("mailer", "outbox lock poisoned"))?
            .push(GroupMailItem {
                title: title.to_string(),
                content: content.to_string(),
                recipients: recipients.to_vec(),
            });
        Ok(())
    }
}
