use std::sync::Arc;

use tracing::{info, instrument};

use partnerlink_core::DomainResult;
use partnerlink_events::SuggestionStateUpdateRequested;
use partnerlink_suggestions::{CompanySuggestion, SuggestionDecision, SuggestionEngine};

/// Records an accept/decline decision on one suggestion.
pub struct SuggestionUpdateCoordinator {
    suggestions: Arc<SuggestionEngine>,
}

impl SuggestionUpdateCoordinator {
    pub fn new(suggestions: Arc<SuggestionEngine>) -> Self {
        Self { suggestions }
    }

    /// `Pending` is rejected before the suggestion is looked up. A suggestion
    /// that was already decided may be decided again; the latest decision wins.
    #[instrument(
        skip_all,
        fields(
            company_id = %trigger.company_id,
            suggested_company_id = %trigger.suggested_company_id,
            requested_state = %trigger.requested_state
        )
    )]
    pub async fn handle(&self, trigger: SuggestionStateUpdateRequested) -> DomainResult<CompanySuggestion> {
        let decision = SuggestionDecision::try_from(trigger.requested_state)?;

        let mut suggestion = self
            .suggestions
            .get_one(trigger.company_id, trigger.suggested_company_id)
            .await?;
        let previous = suggestion.state();
        suggestion.resolve(decision);

        self.suggestions
            .update_suggestion(trigger.company_id, suggestion.clone())
            .await?;

        info!(previous = %previous, state = %suggestion.state(), "suggestion resolved");
        Ok(suggestion)
    }
}
