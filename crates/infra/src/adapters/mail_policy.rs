use async_trait::async_trait;

use partnerlink_core::{CollaboratorError, CompanyId, MailTypeId};
use partnerlink_mail::{GroupMailItem, MailPolicySource, MailSequence};

/// Growth policy that gives every company the same mail sequence.
///
/// Mails are plain text listing the pending candidate ids, addressed to
/// `company-{id}@{recipient_domain}`.
#[derive(Debug, Clone)]
pub struct StaticMailPolicy {
    sequence: MailSequence,
    recipient_domain: String,
}

impl StaticMailPolicy {
    pub fn new(sequence: MailSequence, recipient_domain: impl Into<String>) -> Self {
        Self {
            sequence,
            recipient_domain: recipient_domain.into(),
        }
    }

    pub fn recipient_for(&self, company_id: CompanyId) -> String {
        format!("company-{company_id}@{}", self.recipient_domain)
    }
}

#[async_trait]
impl MailPolicySource for StaticMailPolicy {
    async fn scheduled_sequence(&self, _company_id: CompanyId) -> Result<MailSequence, CollaboratorError> {
        Ok(self.sequence.clone())
    }

    async fn materialize_mail(
        &self,
        company_id: CompanyId,
        mail_type_id: MailTypeId,
        pending_candidate_ids: &[CompanyId],
    ) -> Result<GroupMailItem, CollaboratorError> {
        let listed: Vec<String> = pending_candidate_ids.iter().map(ToString::to_string).collect();

        Ok(GroupMailItem {
            title: format!("You have {} partner suggestions waiting", pending_candidate_ids.len()),
            content: format!(
                "[mail type {mail_type_id}] Suggested partner companies: {}",
                listed.join(", ")
            ),
            recipients: vec![self.recipient_for(company_id)],
        })
    }
}
