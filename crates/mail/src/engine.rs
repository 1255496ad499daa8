//! Mail sequence engine: sequence generation and retrieval, and dispatch of
//! the pending-suggestions mail.

use std::sync::Arc;

use tracing::{debug, info, warn};

use partnerlink_core::{Company, CompanyId, DomainError, DomainResult, MailTypeId};
use partnerlink_suggestions::CompanySuggestion;

use crate::model::MailSequence;
use crate::ports::{MailPolicySource, MailSequenceStore, Mailer};

pub struct MailSequenceEngine {
    policy: Arc<dyn MailPolicySource>,
    mailer: Arc<dyn Mailer>,
    store: Arc<dyn MailSequenceStore>,
}

impl MailSequenceEngine {
    pub fn new(
        policy: Arc<dyn MailPolicySource>,
        mailer: Arc<dyn Mailer>,
        store: Arc<dyn MailSequenceStore>,
    ) -> Self {
        Self {
            policy,
            mailer,
            store,
        }
    }

    /// Fetch the policy sequence for `company` and persist it verbatim.
    ///
    /// An empty policy sequence is `MailSequenceUnavailable` and nothing is
    /// written.
    pub async fn generate_sequence(&self, company: &Company) -> DomainResult<MailSequence> {
        let sequence = self.policy.scheduled_sequence(company.id).await?;
        if sequence.is_empty() {
            return Err(DomainError::MailSequenceUnavailable(company.id));
        }

        let duplicates = sequence.duplicate_mail_types();
        if !duplicates.is_empty() {
            warn!(
                company_id = %company.id,
                duplicates = ?duplicates,
                "mail sequence repeats mail types; only the first occurrence is reachable"
            );
        }

        self.store
            .put_mail_sequence(company.id, sequence.clone())
            .await?;

        info!(
            company_id = %company.id,
            steps = sequence.len(),
            "stored mail sequence"
        );
        Ok(sequence)
    }

    /// Stored sequence of `company_id`. Absent or empty is `MailSequenceNotFound`.
    pub async fn get_sequence(&self, company_id: CompanyId) -> DomainResult<MailSequence> {
        match self.store.get_mail_sequence(company_id).await? {
            Some(sequence) if !sequence.is_empty() => Ok(sequence),
            _ => Err(DomainError::MailSequenceNotFound(company_id)),
        }
    }

    /// Materialize the reminder for `pending` and hand it to the mailer as is.
    pub async fn send_pending_mail(
        &self,
        company_id: CompanyId,
        mail_type_id: MailTypeId,
        pending: &[CompanySuggestion],
    ) -> DomainResult<()> {
        let candidate_ids: Vec<CompanyId> = pending.iter().map(CompanySuggestion::company_id).collect();

        let mail = self
            .policy
            .materialize_mail(company_id, mail_type_id, &candidate_ids)
            .await?;
        debug!(
            company_id = %company_id,
            mail_type_id = %mail_type_id,
            recipients = mail.recipients.len(),
            "materialized pending suggestions mail"
        );

        self.mailer
            .send(&mail.title, &mail.content, &mail.recipients)
            .await?;

        info!(
            company_id = %company_id,
            mail_type_id = %mail_type_id,
            pending = candidate_ids.len(),
            "sent pending suggestions mail"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use partnerlink_core::CollaboratorError;
    use partnerlink_suggestions::SuggestionState;

    use super::*;
    use crate::model::{GroupMailItem, ScheduledMailDetails};

    struct FixedPolicy {
        sequence: MailSequence,
        requests: Mutex<Vec<(CompanyId, MailTypeId, Vec<CompanyId>)>>,
    }

    impl FixedPolicy {
        fn new(sequence: MailSequence) -> Self {
            Self {
                sequence,
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl MailPolicySource for FixedPolicy {
        async fn scheduled_sequence(&self, _company_id: CompanyId) -> Result<MailSequence, CollaboratorError> {
            Ok(self.sequence.clone())
        }

        async fn materialize_mail(
            &self,
            company_id: CompanyId,
            mail_type_id: MailTypeId,
            pending_candidate_ids: &[CompanyId],
        ) -> Result<GroupMailItem, CollaboratorError> {
            self.requests.lock().unwrap().push((
                company_id,
                mail_type_id,
                pending_candidate_ids.to_vec(),
            ));
            Ok(GroupMailItem {
                title: format!("mail {mail_type_id}"),
                content: format!("{} pending", pending_candidate_ids.len()),
                recipients: vec![format!("owner-{company_id}@test")],
            })
        }
    }

    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<GroupMailItem>>,
        fail: bool,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, title: &str, content: &str, recipients: &[String]) -> Result<(), CollaboratorError> {
            if self.fail {
                return Err(CollaboratorError::msg("mailer", "smtp relay refused connection"));
            }
            self.sent.lock().unwrap().push(GroupMailItem {
                title: title.to_string(),
                content: content.to_string(),
                recipients: recipients.to_vec(),
            });
            Ok(())
        }
    }

    #[derive(Default)]
    struct MemorySequences {
        sequences: Mutex<HashMap<CompanyId, MailSequence>>,
        puts: Mutex<usize>,
    }

    #[async_trait]
    impl MailSequenceStore for MemorySequences {
        async fn get_mail_sequence(&self, company_id: CompanyId) -> Result<Option<MailSequence>, CollaboratorError> {
            Ok(self.sequences.lock().unwrap().get(&company_id).cloned())
        }

        async fn put_mail_sequence(
            &self,
            company_id: CompanyId,
            sequence: MailSequence,
        ) -> Result<(), CollaboratorError> {
            *self.puts.lock().unwrap() += 1;
            self.sequences.lock().unwrap().insert(company_id, sequence);
            Ok(())
        }
    }

    fn step(mail_type: i64, minutes: u64) -> ScheduledMailDetails {
        ScheduledMailDetails::new(MailTypeId::new(mail_type), Duration::from_secs(minutes * 60))
    }

    fn company() -> Company {
        Company::new(CompanyId::new(7), "DE", "logistics")
    }

    struct Fixture {
        engine: MailSequenceEngine,
        policy: Arc<FixedPolicy>,
        mailer: Arc<RecordingMailer>,
        store: Arc<MemorySequences>,
    }

    fn fixture(sequence: MailSequence, mailer: RecordingMailer) -> Fixture {
        let policy = Arc::new(FixedPolicy::new(sequence));
        let mailer = Arc::new(mailer);
        let store = Arc::new(MemorySequences::default());
        Fixture {
            engine: MailSequenceEngine::new(policy.clone(), mailer.clone(), store.clone()),
            policy,
            mailer,
            store,
        }
    }

    #[tokio::test]
    async fn generate_persists_the_policy_sequence_verbatim() {
        let sequence = MailSequence::new(vec![step(31, 0), step(41, 15)]);
        let f = fixture(sequence.clone(), RecordingMailer::default());

        let generated = f.engine.generate_sequence(&company()).await.unwrap();

        assert_eq!(generated, sequence);
        assert_eq!(f.engine.get_sequence(CompanyId::new(7)).await.unwrap(), sequence);
        assert_eq!(*f.store.puts.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn generate_keeps_duplicate_mail_types() {
        let sequence = MailSequence::new(vec![step(31, 0), step(31, 15)]);
        let f = fixture(sequence.clone(), RecordingMailer::default());

        let generated = f.engine.generate_sequence(&company()).await.unwrap();

        assert_eq!(generated.len(), 2);
    }

    #[tokio::test]
    async fn generate_with_empty_policy_is_unavailable() {
        let f = fixture(MailSequence::default(), RecordingMailer::default());

        let err = f.engine.generate_sequence(&company()).await.unwrap_err();

        assert!(matches!(err, DomainError::MailSequenceUnavailable(id) if id == CompanyId::new(7)));
        assert_eq!(*f.store.puts.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn get_sequence_of_unknown_company_is_not_found() {
        let f = fixture(MailSequence::default(), RecordingMailer::default());

        let err = f.engine.get_sequence(CompanyId::new(3)).await.unwrap_err();

        assert!(matches!(err, DomainError::MailSequenceNotFound(id) if id == CompanyId::new(3)));
    }

    #[tokio::test]
    async fn get_sequence_of_empty_record_is_not_found() {
        let f = fixture(MailSequence::default(), RecordingMailer::default());
        f.store
            .sequences
            .lock()
            .unwrap()
            .insert(CompanyId::new(3), MailSequence::default());

        let err = f.engine.get_sequence(CompanyId::new(3)).await.unwrap_err();

        assert!(matches!(err, DomainError::MailSequenceNotFound(_)));
    }

    #[tokio::test]
    async fn send_pending_mail_passes_candidate_ids_in_order() {
        let f = fixture(MailSequence::default(), RecordingMailer::default());
        let pending = vec![
            CompanySuggestion::new(CompanyId::new(12)),
            CompanySuggestion::new(CompanyId::new(4)),
            CompanySuggestion::with_state(CompanyId::new(9), SuggestionState::Pending),
        ];

        f.engine
            .send_pending_mail(CompanyId::new(7), MailTypeId::new(41), &pending)
            .await
            .unwrap();

        let requests = f.policy.requests.lock().unwrap();
        assert_eq!(
            *requests,
            vec![(
                CompanyId::new(7),
                MailTypeId::new(41),
                vec![CompanyId::new(12), CompanyId::new(4), CompanyId::new(9)]
            )]
        );

        let sent = f.mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].title, "mail 41");
        assert_eq!(sent[0].content, "3 pending");
        assert_eq!(sent[0].recipients, vec!["owner-7@test".to_string()]);
    }

    #[tokio::test]
    async fn send_pending_mail_propagates_mailer_failures() {
        let f = fixture(
            MailSequence::default(),
            RecordingMailer {
                fail: true,
                ..RecordingMailer::default()
            },
        );

        let err = f
            .engine
            .send_pending_mail(
                CompanyId::new(7),
                MailTypeId::new(41),
                &[CompanySuggestion::new(CompanyId::new(2))],
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Collaborator(ref e) if e.collaborator() == "mailer"));
    }
}
