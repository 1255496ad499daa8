//! `partnerlink-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the suggestion and
//! mail crates (no IO).

pub mod company;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use company::Company;
pub use entity::Entity;
pub use error::{CollaboratorError, DomainError, DomainResult, ErrorClass};
pub use id::{CompanyId, MailTypeId};
pub use value_object::ValueObject;
