use serde::Deserialize;
use serde_json::{Value, json};

use partnerlink_core::{Company, CompanyId, DomainError};
use partnerlink_infra::lifecycle::{Onboarding, TimerOutcome};
use partnerlink_mail::{Advancement, MailSequence, ScheduledMailDetails};
use partnerlink_suggestions::{CompanySuggestion, SuggestionState};

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateCompanyRequest {
    #[serde(default)]
    pub company: Option<Company>,
}

#[derive(Debug, Deserialize)]
pub struct TimerFiredRequest {
    pub company_id: i64,
    pub mail_type_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSuggestionRequest {
    pub state: String,
}

#[derive(Debug, Deserialize)]
pub struct SuggestionsQuery {
    pub state: Option<String>,
}

// -------------------------
// Response mapping
// -------------------------

pub fn suggestion_to_json(s: &CompanySuggestion) -> Value {
    json!({
        "company_id": s.company_id().get(),
        "state": s.state().as_str(),
    })
}

pub fn step_to_json(step: &ScheduledMailDetails) -> Value {
    json!({
        "mail_type_id": step.mail_type_id.get(),
        "delay_secs": step.delay.as_secs(),
    })
}

pub fn sequence_to_json(sequence: &MailSequence) -> Value {
    Value::Array(sequence.iter().map(step_to_json).collect())
}

/// The armed step, or `null` once the sequence is exhausted.
pub fn advancement_to_json(advancement: &Advancement) -> Value {
    match advancement {
        Advancement::Armed(step) => step_to_json(step),
        Advancement::Exhausted => Value::Null,
    }
}

pub fn onboarding_to_json(onboarding: &Onboarding) -> Value {
    json!({
        "company_id": onboarding.company.id.get(),
        "suggestions": onboarding.suggestions.iter().map(suggestion_to_json).collect::<Vec<_>>(),
        "mail_sequence": sequence_to_json(&onboarding.sequence),
        "next": advancement_to_json(&onboarding.advancement),
    })
}

pub fn timer_outcome_to_json(outcome: &TimerOutcome) -> Value {
    match outcome {
        TimerOutcome::NothingPending => json!({ "outcome": "nothing_pending", "next": null }),
        TimerOutcome::Sent { advancement } => json!({
            "outcome": "sent",
            "next": advancement_to_json(advancement),
        }),
    }
}

// -------------------------
// Parsing helpers
// -------------------------

pub fn parse_company_id(raw: &str) -> Result<CompanyId, axum::response::Response> {
    raw.parse().map_err(errors::domain_error_to_response)
}

pub fn parse_state(raw: &str) -> Result<SuggestionState, axum::response::Response> {
    raw.parse().map_err(errors::domain_error_to_response)
}

/// Target state of a suggestion update. Anything that is not a known state
/// is an unsupported update, like `pending`.
pub fn requested_state(raw: &str) -> Result<SuggestionState, DomainError> {
    raw.parse()
        .map_err(|_| DomainError::UnsupportedStateUpdate(raw.trim().to_string()))
}
