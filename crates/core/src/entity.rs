//! Entities: records that keep one identity while their state changes.

/// Something looked up and replaced by identity rather than by value.
///
/// A company suggestion is keyed by the suggested company: deciding on it
/// changes its state, never which candidate it refers to.
pub trait Entity {
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
