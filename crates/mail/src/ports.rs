//! Collaborator boundaries used by the mail sequence engine and sequencer.

use std::time::Duration;

use async_trait::async_trait;

use partnerlink_core::{CollaboratorError, CompanyId, MailTypeId};

use crate::model::{GroupMailItem, MailSequence};

/// Growth policy: which mails a company receives, and what they say.
#[async_trait]
pub trait MailPolicySource: Send + Sync {
    /// Ordered mail sequence for `company_id` (possibly empty).
    async fn scheduled_sequence(&self, company_id: CompanyId) -> Result<MailSequence, CollaboratorError>;

    /// Build the mail reminding `company_id` of its pending suggestions.
    async fn materialize_mail(
        &self,
        company_id: CompanyId,
        mail_type_id: MailTypeId,
        pending_candidate_ids: &[CompanyId],
    ) -> Result<GroupMailItem, CollaboratorError>;
}

/// Durable storage of per-company mail sequences.
#[async_trait]
pub trait MailSequenceStore: Send + Sync {
    async fn get_mail_sequence(&self, company_id: CompanyId) -> Result<Option<MailSequence>, CollaboratorError>;

    async fn put_mail_sequence(
        &self,
        company_id: CompanyId,
        sequence: MailSequence,
    ) -> Result<(), CollaboratorError>;
}

/// Outbound mail transport.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, title: &str, content: &str, recipients: &[String]) -> Result<(), CollaboratorError>;
}

/// Arms one future "timer fired" notification.
///
/// What happens when the same key is armed twice is up to the implementation.
#[async_trait]
pub trait TimerSink: Send + Sync {
    async fn arm(
        &self,
        company_id: CompanyId,
        mail_type_id: MailTypeId,
        delay: Duration,
    ) -> Result<(), CollaboratorError>;
}
