//! Collaborator boundaries used by the suggestion engine.

use async_trait::async_trait;

use partnerlink_core::{CollaboratorError, Company, CompanyId};

use crate::suggestion::CompanySuggestion;

/// Source of candidate partner companies.
///
/// May return any number of companies, including the requesting company
/// itself.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    async fn fetch(&self, country: &str, industry: &str) -> Result<Vec<Company>, CollaboratorError>;
}

/// Durable storage of per-company suggestion lists.
///
/// `get_suggestions` returns `None` for an unknown company and never
/// synthesizes data.
#[async_trait]
pub trait SuggestionStore: Send + Sync {
    async fn get_suggestions(
        &self,
        company_id: CompanyId,
    ) -> Result<Option<Vec<CompanySuggestion>>, CollaboratorError>;

    async fn put_suggestions(
        &self,
        company_id: CompanyId,
        suggestions: Vec<CompanySuggestion>,
    ) -> Result<(), CollaboratorError>;

    async fn update_suggestion(
        &self,
        company_id: CompanyId,
        suggestion: CompanySuggestion,
    ) -> Result<(), CollaboratorError>;
}

