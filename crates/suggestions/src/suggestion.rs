use core::str::FromStr;

use serde::{Deserialize, Serialize};

use partnerlink_core::{CompanyId, DomainError, Entity};

/// Resolution state of a suggested partnership.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionState {
    /// No decision has been recorded yet.
    #[default]
    Pending,
    Accepted,
    Declined,
}

impl SuggestionState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            SuggestionState::Pending => "pending",
            SuggestionState::Accepted => "accepted",
            SuggestionState::Declined => "declined",
        }
    }
}

impl core::fmt::Display for SuggestionState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SuggestionState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(SuggestionState::Pending),
            "accepted" => Ok(SuggestionState::Accepted),
            "declined" => Ok(SuggestionState::Declined),
            other => Err(DomainError::invalid_input(format!(
                "unknown suggestion state '{other}' (expected pending, accepted or declined)"
            ))),
        }
    }
}

/// A decision on a suggestion: the only legal targets of a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionDecision {
    Accepted,
    Declined,
}

impl From<SuggestionDecision> for SuggestionState {
    fn from(value: SuggestionDecision) -> Self {
        match value {
            SuggestionDecision::Accepted => SuggestionState::Accepted,
            SuggestionDecision::Declined => SuggestionState::Declined,
        }
    }
}

impl TryFrom<SuggestionState> for SuggestionDecision {
    type Error = DomainError;

    fn try_from(value: SuggestionState) -> Result<Self, Self::Error> {
        match value {
            SuggestionState::Accepted => Ok(SuggestionDecision::Accepted),
            SuggestionState::Declined => Ok(SuggestionDecision::Declined),
            SuggestionState::Pending => Err(DomainError::UnsupportedStateUpdate(
                value.as_str().to_string(),
            )),
        }
    }
}

/// A partner company suggested to an owning company.
///
/// The owning company is implied by the store key; `company_id` is the
/// suggested partner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanySuggestion {
    company_id: CompanyId,
    state: SuggestionState,
}

impl CompanySuggestion {
    /// A fresh, pending suggestion of `company_id`.
    pub fn new(company_id: CompanyId) -> Self {
        Self {
            company_id,
            state: SuggestionState::Pending,
        }
    }

    /// Rehydrate a suggestion as it was stored.
    pub fn with_state(company_id: CompanyId, state: SuggestionState) -> Self {
        Self { company_id, state }
    }

    pub fn company_id(&self) -> CompanyId {
        self.company_id
    }

    pub fn state(&self) -> SuggestionState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        self.state == SuggestionState::Pending
    }

    /// Record a decision. A later decision replaces an earlier one.
    pub fn resolve(&mut self, decision: SuggestionDecision) {
        self.state = decision.into();
    }
}

impl Entity for CompanySuggestion {
    type Id = CompanyId;

    fn id(&self) -> &Self::Id {
        &self.company_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_suggestions_start_pending() {
        let suggestion = CompanySuggestion::new(CompanyId::new(789));
        assert_eq!(suggestion.state(), SuggestionState::Pending);
        assert!(suggestion.is_pending());
    }

    #[test]
    fn resolve_moves_to_the_decided_state() {
        let mut suggestion = CompanySuggestion::new(CompanyId::new(789));

        suggestion.resolve(SuggestionDecision::Accepted);
        assert_eq!(suggestion.state(), SuggestionState::Accepted);

        suggestion.resolve(SuggestionDecision::Declined);
        assert_eq!(suggestion.state(), SuggestionState::Declined);
        assert_eq!(suggestion.company_id(), CompanyId::new(789));
    }

    #[test]
    fn pending_is_not_a_decision() {
        let err = SuggestionDecision::try_from(SuggestionState::Pending).unwrap_err();
        match err {
            DomainError::UnsupportedStateUpdate(state) => assert_eq!(state, "pending"),
            other => panic!("Expected UnsupportedStateUpdate, got {other:?}"),
        }
    }

    #[test]
    fn accepted_and_declined_are_decisions() {
        assert_eq!(
            SuggestionDecision::try_from(SuggestionState::Accepted).unwrap(),
            SuggestionDecision::Accepted
        );
        assert_eq!(
            SuggestionDecision::try_from(SuggestionState::Declined).unwrap(),
            SuggestionDecision::Declined
        );
    }

    #[test]
    fn states_parse_case_insensitively() {
        assert_eq!("Accepted".parse::<SuggestionState>().unwrap(), SuggestionState::Accepted);
        assert_eq!(" pending ".parse::<SuggestionState>().unwrap(), SuggestionState::Pending);
        assert!("maybe".parse::<SuggestionState>().is_err());
    }

    #[test]
    fn states_serialize_lowercase() {
        let json = serde_json::to_string(&SuggestionState::Declined).unwrap();
        assert_eq!(json, "\"declined\"");
    }
}
