//! Lifecycle coordinators and the router that dispatches triggers to them.

pub mod company_created;
pub mod suggestion_update;
pub mod timer_fired;

use std::sync::Arc;

use tracing::debug;

use partnerlink_core::DomainResult;
use partnerlink_events::{Event, Trigger};
use partnerlink_mail::{MailSequenceEngine, Sequencer};
use partnerlink_suggestions::{CompanySuggestion, SuggestionEngine};

pub use company_created::{CompanyCreatedCoordinator, Onboarding};
pub use suggestion_update::SuggestionUpdateCoordinator;
pub use timer_fired::{TimerFiredCoordinator, TimerOutcome};

/// Result of routing one trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleOutcome {
    Onboarded(Onboarding),
    Timer(TimerOutcome),
    SuggestionResolved(CompanySuggestion),
}

/// Entry point for every inbound trigger.
pub struct Lifecycle {
    company_created: CompanyCreatedCoordinator,
    timer_fired: TimerFiredCoordinator,
    suggestion_update: SuggestionUpdateCoordinator,
}

impl Lifecycle {
    pub fn new(
        suggestions: Arc<SuggestionEngine>,
        mail: Arc<MailSequenceEngine>,
        sequencer: Arc<Sequencer>,
    ) -> Self {
        Self {
            company_created: CompanyCreatedCoordinator::new(
                suggestions.clone(),
                mail.clone(),
                sequencer.clone(),
            ),
            timer_fired: TimerFiredCoordinator::new(suggestions.clone(), mail, sequencer),
            suggestion_update: SuggestionUpdateCoordinator::new(suggestions),
        }
    }

    pub async fn handle(&self, trigger: Trigger) -> DomainResult<LifecycleOutcome> {
        debug!(
            event_type = trigger.event_type(),
            occurred_at = %trigger.occurred_at(),
            "handling trigger"
        );

        match trigger {
            Trigger::CompanyCreated(e) => self
                .company_created
                .handle(e)
                .await
                .map(LifecycleOutcome::Onboarded),
            Trigger::ScheduledMailDue(e) => self.timer_fired.handle(e).await.map(LifecycleOutcome::Timer),
            Trigger::SuggestionStateUpdateRequested(e) => self
                .suggestion_update
                .handle(e)
                .await
                .map(LifecycleOutcome::SuggestionResolved),
        }
    }
}
