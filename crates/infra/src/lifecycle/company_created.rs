//! Onboarding of a newly registered company.
//!
//! Steps run strictly in order and stop at the first failure:
//! 1. generate and persist suggestions
//! 2. generate and persist the mail sequence
//! 3. arm the first mail of the sequence
//!
//! Nothing is rolled back: a failure in step 2 leaves the suggestions of
//! step 1 in place.

use std::sync::Arc;

use tracing::{info, instrument};

use partnerlink_core::{Company, DomainError, DomainResult};
use partnerlink_events::CompanyCreated;
use partnerlink_mail::{Advancement, MailSequence, MailSequenceEngine, Sequencer};
use partnerlink_suggestions::{CompanySuggestion, SuggestionEngine};

/// What onboarding produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Onboarding {
    pub company: Company,
    pub suggestions: Vec<CompanySuggestion>,
    pub sequence: MailSequence,
    pub advancement: Advancement,
}

pub struct CompanyCreatedCoordinator {
    suggestions: Arc<SuggestionEngine>,
    mail: Arc<MailSequenceEngine>,
    sequencer: Arc<Sequencer>,
}

impl CompanyCreatedCoordinator {
    pub fn new(
        suggestions: Arc<SuggestionEngine>,
        mail: Arc<MailSequenceEngine>,
        sequencer: Arc<Sequencer>,
    ) -> Self {
        Self {
            suggestions,
            mail,
            sequencer,
        }
    }

    #[instrument(skip_all, fields(company_id = ?trigger.company.as_ref().map(|c| c.id)))]
    pub async fn handle(&self, trigger: CompanyCreated) -> DomainResult<Onboarding> {
        let company = trigger
            .company
            .ok_or_else(|| DomainError::invalid_input("company created trigger carries no company"))?;

        let suggestions = self.suggestions.generate_suggestions(&company).await?;
        let sequence = self.mail.generate_sequence(&company).await?;
        let advancement = self.sequencer.advance(company.id, &sequence, None).await?;

        info!(
            company_id = %company.id,
            suggestions = suggestions.len(),
            steps = sequence.len(),
            "company onboarded"
        );

        Ok(Onboarding {
            company,
            suggestions,
            sequence,
            advancement,
        })
    }
}
