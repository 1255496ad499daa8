//! Reaction to a fired mail timer.

use std::sync::Arc;

use tracing::{info, instrument};

use partnerlink_core::{DomainError, DomainResult};
use partnerlink_events::ScheduledMailDue;
use partnerlink_mail::{Advancement, MailSequenceEngine, Sequencer};
use partnerlink_suggestions::{CompanySuggestion, SuggestionEngine};

/// Result of handling one fired timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerOutcome {
    /// Every suggestion is resolved; no mail was sent and nothing re-armed.
    NothingPending,
    /// The reminder went out and the sequence advanced.
    Sent { advancement: Advancement },
}

pub struct TimerFiredCoordinator {
    suggestions: Arc<SuggestionEngine>,
    mail: Arc<MailSequenceEngine>,
    sequencer: Arc<Sequencer>,
}

impl TimerFiredCoordinator {
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

    /// Send the due mail if anything is still pending, then arm the next one.
    ///
    /// The mail type must belong to the company's stored sequence; otherwise
    /// `UnknownMailType` is returned before anything is sent.
    #[instrument(skip_all, fields(company_id = %trigger.company_id, mail_type_id = %trigger.mail_type_id))]
    pub async fn handle(&self, trigger: ScheduledMailDue) -> DomainResult<TimerOutcome> {
        let ScheduledMailDue {
            company_id,
            mail_type_id,
            ..
        } = trigger;

        let pending = self
            .suggestions
            .get_all_suggestions(company_id, Some(&CompanySuggestion::is_pending))
            .await?;
        if pending.is_empty() {
            info!("no pending suggestions left, mail sequence stops");
            return Ok(TimerOutcome::NothingPending);
        }

        let sequence = self.mail.get_sequence(company_id).await?;
        if !sequence.contains(mail_type_id) {
            return Err(DomainError::unknown_mail_type(company_id, mail_type_id));
        }

        self.mail
            .send_pending_mail(company_id, mail_type_id, &pending)
            .await?;
        let advancement = self
            .sequencer
            .advance(company_id, &sequence, Some(mail_type_id))
            .await?;

        Ok(TimerOutcome::Sent { advancement })
    }
}
