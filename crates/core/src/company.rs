//! Company value handed to the service by the companies boundary.

use serde::{Deserialize, Serialize};

use crate::id::CompanyId;
use crate::value_object::ValueObject;

/// Relevant details of a company.
///
/// Created externally and never mutated here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub country: String,
    pub industry: String,
}

impl Company {
    pub fn new(id: CompanyId, country: impl Into<String>, industry: impl Into<String>) -> Self {
        Self {
            id,
            country: country.into(),
            industry: industry.into(),
        }
    }
}

impl ValueObject for Company {}

