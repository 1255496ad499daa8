//! Dev/test implementations of every lifecycle collaborator.

pub mod directory;
pub mod mail_policy;
pub mod mailer;
pub mod store;
pub mod timer;

pub use directory::InMemoryCompanyDirectory;
pub use mail_policy::StaticMailPolicy;
pub use mailer::LoggingMailer;
pub use store::InMemorySuggestionStore;
pub use timer::InProcessTimer;
