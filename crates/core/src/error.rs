//! Domain error model.

use thiserror::Error;

use crate::id::{CompanyId, MailTypeId};

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Coarse classification of a [`DomainError`].
///
/// Every error is terminal for the operation that raised it; the class only
/// tells the boundary (HTTP, worker logs) what kind of failure it was.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// A required input was missing or malformed.
    InvalidInput,
    /// The requested entity does not exist in this service's view.
    NotFound,
    /// An upstream collaborator had nothing to offer.
    Unavailable,
    /// Caller state disagrees with the authoritative mail sequence.
    Consistency,
    /// The requested operation is not supported.
    Unsupported,
    /// A collaborator call failed.
    Collaborator,
}

impl ErrorClass {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorClass::InvalidInput => "invalid_input",
            ErrorClass::NotFound => "not_found",
            ErrorClass::Unavailable => "unavailable",
            ErrorClass::Consistency => "consistency",
            ErrorClass::Unsupported => "unsupported",
            ErrorClass::Collaborator => "collaborator",
        }
    }
}

/// Failure reported by an external collaborator (store, candidate source,
/// mail policy, mailer, timer).
///
/// The original error is kept as the `source` so it reaches the caller
/// unchanged.
#[derive(Debug, Error)]
#[error("{collaborator} failed: {source}")]
pub struct CollaboratorError {
    collaborator: &'static str,
    #[source]
    source: anyhow::Error,
}

impl CollaboratorError {
    pub fn new(collaborator: &'static str, source: impl Into<anyhow::Error>) -> Self {
        Self {
            collaborator,
            source: source.into(),
        }
    }

    pub fn msg(collaborator: &'static str, message: impl Into<String>) -> Self {
        Self::new(collaborator, anyhow::anyhow!(message.into()))
    }

    pub fn collaborator(&self) -> &'static str {
        self.collaborator
    }

    pub fn inner(&self) -> &anyhow::Error {
        &self.source
    }
}

/// Domain-level error.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A required input was missing before any collaborator was called.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unable to find a record of company '{0}'")]
    CompanyNotFound(CompanyId),

    #[error("suggested company '{suggested_company_id}' not found for company '{company_id}'")]
    SuggestionNotFound {
        company_id: CompanyId,
        suggested_company_id: CompanyId,
    },

    #[error("no persisted mail sequence for company '{0}'")]
    MailSequenceNotFound(CompanyId),

    #[error("retrieved zero companies in country '{country}' and industry '{industry}'")]
    CompaniesUnavailable { country: String, industry: String },

    #[error("retrieved zero scheduled mails for company '{0}'")]
    MailSequenceUnavailable(CompanyId),

    #[error("unknown mail type '{mail_type_id}' scheduled for company '{company_id}'")]
    UnknownMailType {
        company_id: CompanyId,
        mail_type_id: MailTypeId,
    },

    #[error("updating to suggestion state '{0}' is not supported")]
    UnsupportedStateUpdate(String),

    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
}

impl DomainError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn companies_unavailable(country: impl Into<String>, industry: impl Into<String>) -> Self {
        Self::CompaniesUnavailable {
            country: country.into(),
            industry: industry.into(),
        }
    }

    pub fn suggestion_not_found(company_id: CompanyId, suggested_company_id: CompanyId) -> Self {
        Self::SuggestionNotFound {
            company_id,
            suggested_company_id,
        }
    }

    pub fn unknown_mail_type(company_id: CompanyId, mail_type_id: MailTypeId) -> Self {
        Self::UnknownMailType {
            company_id,
            mail_type_id,
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            DomainError::InvalidInput(_) => ErrorClass::InvalidInput,
            DomainError::CompanyNotFound(_)
            | DomainError::SuggestionNotFound { .. }
            | DomainError::MailSequenceNotFound(_) => ErrorClass::NotFound,
            DomainError::CompaniesUnavailable { .. } | DomainError::MailSequenceUnavailable(_) => {
                ErrorClass::Unavailable
            }
            DomainError::UnknownMailType { .. } => ErrorClass::Consistency,
            DomainError::UnsupportedStateUpdate(_) => ErrorClass::Unsupported,
            DomainError::Collaborator(_) => ErrorClass::Collaborator,
        }
    }
}
