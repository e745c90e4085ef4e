//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Participants are the only entities in the ledger domain; everything else
/// refers to them by identifier.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
