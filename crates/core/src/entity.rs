//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// A stock lot is an entity: its remaining quantity changes over time, but it
/// stays the same lot for as long as its identifier does.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
