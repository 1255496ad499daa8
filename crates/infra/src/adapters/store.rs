use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use partnerlink_core::{CollaboratorError, CompanyId};
use partnerlink_mail::{MailSequence, MailSequenceStore};
use partnerlink_suggestions::{CompanySuggestion, SuggestionStore};

const COLLABORATOR: &str = "suggestion_store";

fn poisoned() -> CollaboratorError {
    CollaboratorError::msg(COLLABORATOR, "store lock poisoned")
}

/// In-memory store for suggestion lists and mail sequences, keyed by the
/// owning company.
#[derive(Debug, Default)]
pub struct InMemorySuggestionStore {
    suggestions: RwLock<HashMap<CompanyId, Vec<CompanySuggestion>>>,
    sequences: RwLock<HashMap<CompanyId, MailSequence>>,
}

impl InMemorySuggestionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SuggestionStore for InMemorySuggestionStore {
    async fn get_suggestions(
        &self,
        company_id: CompanyId,
    ) -> Result<Option<Vec<CompanySuggestion>>, CollaboratorError> {
        let map = self.suggestions.read().map_err(|_| poisoned())?;
        Ok(map.get(&company_id).cloned())
    }

    async fn put_suggestions(
        &self,
        company_id: CompanyId,
        suggestions: Vec<CompanySuggestion>,
    ) -> Result<(), CollaboratorError> {
        let mut map = self.suggestions.write().map_err(|_| poisoned())?;
        map.insert(company_id, suggestions);
        Ok(())
    }

    /// Replaces the first entry for the same candidate; appends when there is none.
    async fn update_suggestion(
        &self,
        company_id: CompanyId,
        suggestion: CompanySuggestion,
    ) -> Result<(), CollaboratorError> {
        let mut map = self.suggestions.write().map_err(|_| poisoned())?;
        let list = map.entry(company_id).or_default();

        match list.iter_mut().find(|s| s.company_id() == suggestion.company_id()) {
            Some(existing) => *existing = suggestion,
            None => list.push(suggestion),
        }
        Ok(())
    }
}

#[async_trait]
impl MailSequenceStore for InMemorySuggestionStore {
    async fn get_mail_sequence(&self, company_id: CompanyId) -> Result<Option<MailSequence>, CollaboratorError> {
        let map = self.sequences.read().map_err(|_| poisoned())?;
        Ok(map.get(&company_id).cloned())
    }

    async fn put_mail_sequence(
        &self,
        company_id: CompanyId,
        sequence: MailSequence,
    ) -> Result<(), CollaboratorError> {
        let mut map = self.sequences.write().map_err(|_| poisoned())?;
        map.insert(company_id, sequence);
        Ok(())
    }
}
