//! Entity trait: identity + continuity across state changes.

use std::collections::HashSet;

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// First entity whose id already appeared earlier in the slice.
pub fn first_duplicate<E: Entity>(entities: &[E]) -> Option<&E> {
    let mut seen = HashSet::with_capacity(entities.len());
    entities.iter().find(|e| !seen.insert(e.id()))
}
