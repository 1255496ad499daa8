//! Suggestion engine: creation, filtering, lookup and persistence of
//! company suggestions.

use std::sync::Arc;

use tracing::{debug, info};

use partnerlink_core::{Company, CompanyId, DomainError, DomainResult, Entity};

use crate::ports::{CandidateSource, SuggestionStore};
use crate::suggestion::CompanySuggestion;

/// Predicate applied by [`SuggestionEngine::get_all_suggestions`].
pub type SuggestionFilter<'a> = &'a (dyn Fn(&CompanySuggestion) -> bool + Sync);

/// Turn raw candidates into pending suggestions for `company`.
///
/// The candidate source may echo the requesting company back; it is never
/// suggested to itself. Candidate order is preserved.
pub fn build_suggestions(company: &Company, candidates: Vec<Company>) -> Vec<CompanySuggestion> {
    candidates
        .into_iter()
        .filter(|candidate| candidate.id != company.id)
        .map(|candidate| CompanySuggestion::new(candidate.id))
        .collect()
}

pub struct SuggestionEngine {
    candidates: Arc<dyn CandidateSource>,
    store: Arc<dyn SuggestionStore>,
}

impl SuggestionEngine {
    pub fn new(candidates: Arc<dyn CandidateSource>, store: Arc<dyn SuggestionStore>) -> Self {
        Self { candidates, store }
    }

    /// Create and persist pending suggestions for a newly onboarded company.
    ///
    /// Fails with `CompaniesUnavailable` (and writes nothing) when no
    /// candidate other than the company itself is returned. The batch is
    /// persisted with a single store write.
    pub async fn generate_suggestions(&self, company: &Company) -> DomainResult<Vec<CompanySuggestion>> {
        let candidates = self
            .candidates
            .fetch(&company.country, &company.industry)
            .await?;
        debug!(
            company_id = %company.id,
            candidates = candidates.len(),
            "fetched candidate companies"
        );

        let suggestions = build_suggestions(company, candidates);
        if suggestions.is_empty() {
            return Err(DomainError::companies_unavailable(
                company.country.clone(),
                company.industry.clone(),
            ));
        }

        self.store
            .put_suggestions(company.id, suggestions.clone())
            .await?;

        info!(
            company_id = %company.id,
            suggestions = suggestions.len(),
            "stored company suggestions"
        );
        Ok(suggestions)
    }

    /// Load every suggestion of `company_id`, optionally filtered.
    ///
    /// An absent or empty stored list is `CompanyNotFound`. A filter that
    /// matches nothing yields an empty list, not an error.
    pub async fn get_all_suggestions(
        &self,
        company_id: CompanyId,
        filter: Option<SuggestionFilter<'_>>,
    ) -> DomainResult<Vec<CompanySuggestion>> {
        let suggestions = match self.store.get_suggestions(company_id).await? {
            Some(list) if !list.is_empty() => list,
            _ => return Err(DomainError::CompanyNotFound(company_id)),
        };

        Ok(match filter {
            Some(keep) => suggestions.into_iter().filter(|s| keep(s)).collect(),
            None => suggestions,
        })
    }

    /// First suggestion of `company_id` whose candidate is `suggested_company_id`.
    pub async fn get_one(
        &self,
        company_id: CompanyId,
        suggested_company_id: CompanyId,
    ) -> DomainResult<CompanySuggestion> {
        self.get_all_suggestions(company_id, None)
            .await?
            .into_iter()
            .find(|s| *s.id() == suggested_company_id)
            .ok_or_else(|| DomainError::suggestion_not_found(company_id, suggested_company_id))
    }

    /// Persist a single updated suggestion. Which states are settable is
    /// decided by the caller.
    pub async fn update_suggestion(
        &self,
        company_id: CompanyId,
        suggestion: CompanySuggestion,
    ) -> DomainResult<()> {
        self.store.update_suggestion(company_id, suggestion).await?;
        Ok(())
    }
}
