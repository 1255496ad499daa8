use std::sync::RwLock;

use async_trait::async_trait;
use tracing::debug;

use partnerlink_core::{CollaboratorError, Company};
use partnerlink_suggestions::CandidateSource;

const COLLABORATOR: &str = "company_directory";

/// In-memory company registry used as the candidate source in dev and tests.
///
/// Matches country and industry exactly. The requesting company is returned
/// like any other match.
#[derive(Debug, Default)]
pub struct InMemoryCompanyDirectory {
    companies: RwLock<Vec<Company>>,
}

impl InMemoryCompanyDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `company`, replacing an earlier registration with the same id.
    pub fn register(&self, company: Company) -> Result<(), CollaboratorError> {
        let mut companies = self
            .companies
            .write()
            .map_err(|_| CollaboratorError::msg(COLLABORATOR, "directory lock poisoned"))?;

        match companies.iter_mut().find(|c| c.id == company.id) {
            Some(existing) => *existing = company,
            None => companies.push(company),
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.companies.read().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CandidateSource for InMemoryCompanyDirectory {
    async fn fetch(&self, country: &str, industry: &str) -> Result<Vec<Company>, CollaboratorError> {
        let companies = self
            .companies
            .read()
            .map_err(|_| CollaboratorError::msg(COLLABORATOR, "directory lock poisoned"))?;

        let matches: Vec<Company> = companies
            .iter()
            .filter(|c| c.country == country && c.industry == industry)
            .cloned()
            .collect();
        debug!(country, industry, matches = matches.len(), "directory lookup");
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use partnerlink_core::CompanyId;

    use super::*;

    #[tokio::test]
    async fn fetch_matches_country_and_industry_exactly() {
        let directory = InMemoryCompanyDirectory::new();
        directory.register(Company::new(CompanyId::new(1), "NZ", "dairy")).unwrap();
        directory.register(Company::new(CompanyId::new(2), "NZ", "dairy")).unwrap();
        directory.register(Company::new(CompanyId::new(3), "NZ", "wine")).unwrap();
        directory.register(Company::new(CompanyId::new(4), "nz", "dairy")).unwrap();

        let found = directory.fetch("NZ", "dairy").await.unwrap();

        let ids: Vec<i64> = found.iter().map(|c| c.id.get()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn register_replaces_same_id() {
        let directory = InMemoryCompanyDirectory::new();
        directory.register(Company::new(CompanyId::new(1), "NZ", "dairy")).unwrap();
        directory.register(Company::new(CompanyId::new(1), "AU", "mining")).unwrap();

        assert_eq!(directory.len(), 1);
    }
}
