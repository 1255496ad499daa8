use std::sync::Arc;

use partnerlink_events::{InMemoryEventBus, Trigger};
use partnerlink_infra::adapters::{
    InMemoryCompanyDirectory, InMemorySuggestionStore, InProcessTimer, LoggingMailer, StaticMailPolicy,
};
use partnerlink_infra::lifecycle::Lifecycle;
use partnerlink_mail::{MailSequenceEngine, Sequencer};
use partnerlink_suggestions::SuggestionEngine;

use crate::config::ApiConfig;

pub type TriggerBus = InMemoryEventBus<Trigger>;

/// Everything the HTTP handlers need, wired over the in-memory adapters.
pub struct AppServices {
    pub lifecycle: Arc<Lifecycle>,
    pub suggestions: Arc<SuggestionEngine>,
    pub mail: Arc<MailSequenceEngine>,
    pub directory: Arc<InMemoryCompanyDirectory>,
    pub bus: Arc<TriggerBus>,
    pub mailer: Arc<LoggingMailer>,
}

pub fn build_services(config: &ApiConfig) -> AppServices {
    let bus = Arc::new(TriggerBus::new());
    let directory = Arc::new(InMemoryCompanyDirectory::new());
    let store = Arc::new(InMemorySuggestionStore::new());
    let mailer = Arc::new(LoggingMailer::new());
    let timer = Arc::new(InProcessTimer::new(bus.clone()));
    let policy = Arc::new(StaticMailPolicy::new(
        config.mail_sequence.clone(),
        config.recipient_domain.clone(),
    ));

    let suggestions = Arc::new(SuggestionEngine::new(directory.clone(), store.clone()));
    let mail = Arc::new(MailSequenceEngine::new(policy, mailer.clone(), store));
    let sequencer = Arc::new(Sequencer::new(timer));
    let lifecycle = Arc::new(Lifecycle::new(suggestions.clone(), mail.clone(), sequencer));

    AppServices {
        lifecycle,
        suggestions,
        mail,
        directory,
        bus,
        mailer,
    }
}
