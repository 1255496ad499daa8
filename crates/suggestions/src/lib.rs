//! Suggestions domain module.
//!
//! Turns raw candidate companies into persisted partner suggestions and owns
//! the lookup and state-transition rules for them. Storage and candidate
//! retrieval are reached through the narrow ports in [`ports`].

pub mod engine;
pub mod ports;
pub mod suggestion;

pub use engine::{SuggestionEngine, SuggestionFilter};
pub use ports::{CandidateSource, SuggestionStore};
pub use suggestion::{CompanySuggestion, SuggestionDecision, SuggestionState};
