//! Entity trait: records identified by id, not by their current field values.

/// A record whose identity survives edits.
pub trait Entity {
    /// Strongly-typed identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> Self::Id;

    /// Whether `other` is the same record, possibly at another revision.
    fn is_same(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
