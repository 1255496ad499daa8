use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use partnerlink_core::{Company, CompanyId, MailTypeId};
use partnerlink_suggestions::SuggestionState;

/// A domain-agnostic event.
///
/// Events are immutable facts with a stable type name and a schema version.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name/type identifier (e.g. "lifecycle.company.created").
    fn event_type(&self) -> &'static str;

    /// Schema version for this event type.
    fn version(&self) -> u32;

    /// When the event occurred (business time).
    fn occurred_at(&self) -> DateTime<Utc>;
}

/// Trigger: a company was registered.
///
/// `company` is optional on the wire; a trigger without one is rejected by
/// the coordinator before any collaborator is called.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyCreated {
    #[serde(default)]
    pub company: Option<Company>,
    #[serde(default = "Utc::now")]
    pub occurred_at: DateTime<Utc>,
}

impl CompanyCreated {
    pub fn new(company: Option<Company>) -> Self {
        Self {
            company,
            occurred_at: Utc::now(),
        }
    }
}

/// Trigger: a previously armed timer fired ("timer fired").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledMailDue {
    pub company_id: CompanyId,
    pub mail_type_id: MailTypeId,
    #[serde(default = "Utc::now")]
    pub occurred_at: DateTime<Utc>,
}

/// Trigger: someone asked to move a suggestion to another state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionStateUpdateRequested {
    pub company_id: CompanyId,
    pub suggested_company_id: CompanyId,
    pub requested_state: SuggestionState,
    #[serde(default = "Utc::now")]
    pub occurred_at: DateTime<Utc>,
}

/// Every inbound trigger of the partner-suggestion lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Trigger {
    CompanyCreated(CompanyCreated),
    ScheduledMailDue(ScheduledMailDue),
    SuggestionStateUpdateRequested(SuggestionStateUpdateRequested),
}

impl Trigger {
    pub fn company_created(company: Company) -> Self {
        Trigger::CompanyCreated(CompanyCreated::new(Some(company)))
    }

    pub fn scheduled_mail_due(company_id: CompanyId, mail_type_id: MailTypeId) -> Self {
        Trigger::ScheduledMailDue(ScheduledMailDue {
            company_id,
            mail_type_id,
            occurred_at: Utc::now(),
        })
    }

    pub fn suggestion_state_update(
        company_id: CompanyId,
        suggested_company_id: CompanyId,
        requested_state: SuggestionState,
    ) -> Self {
        Trigger::SuggestionStateUpdateRequested(SuggestionStateUpdateRequested {
            company_id,
            suggested_company_id,
            requested_state,
            occurred_at: Utc::now(),
        })
    }

    /// Owning company, when the trigger carries one.
    pub fn company_id(&self) -> Option<CompanyId> {
        match self {
            Trigger::CompanyCreated(e) => e.company.as_ref().map(|c| c.id),
            Trigger::ScheduledMailDue(e) => Some(e.company_id),
            Trigger::SuggestionStateUpdateRequested(e) => Some(e.company_id),
        }
    }
}

impl Event for Trigger {
    fn event_type(&self) -> &'static str {
        match self {
            Trigger::CompanyCreated(_) => "lifecycle.company.created",
            Trigger::ScheduledMailDue(_) => "lifecycle.mail.due",
            Trigger::SuggestionStateUpdateRequested(_) => "lifecycle.suggestion.update_requested",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            Trigger::CompanyCreated(e) => e.occurred_at,
            Trigger::ScheduledMailDue(e) => e.occurred_at,
            Trigger::SuggestionStateUpdateRequested(e) => e.occurred_at,
        }
    }
}
