//! State identifiers and the registries that hand them out.
//!
//! A [`StateId`] is an interned name: equality is string equality, and two
//! lookups of the same name through one registry share a single allocation.
//! [`ReferenceTrackingStateIdRegistry`] additionally remembers every name it
//! was asked for, which is how a [`StateBuilder`](crate::StateBuilder)
//! discovers the states a transition can reach.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Opaque identifier of a machine state.
///
/// # Examples
///
/// ```
/// use sch_fsm::{InterningStateIdRegistry, StateIdRegistry};
///
/// let mut ids = InterningStateIdRegistry::new();
/// let a = ids.get("parse-flag");
/// let b = ids.get("parse-flag");
/// assert_eq!(a, b);
/// assert!(a.ptr_eq(&b));
/// assert_eq!(a.name(), "parse-flag");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(Arc<str>);

impl StateId {
    /// Creates an id outside of any registry.
    ///
    /// Ids created this way compare equal to interned ids of the same name
    /// but never share their allocation.
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    /// Returns the name this id was created from.
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Returns `true` when both ids come from the same interning call site,
    /// i.e. the same registry entry.
    pub fn ptr_eq(&self, other: &StateId) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StateId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Source of [`StateId`]s.
pub trait StateIdRegistry {
    /// Returns the id for `name`, interning it on first use.
    fn get(&mut self, name: &str) -> StateId;

    /// Returns `true` if `name` has already been interned.
    fn has(&self, name: &str) -> bool;
}

/// Registry that interns ids by name.
#[derive(Debug, Default, Clone)]
pub struct InterningStateIdRegistry {
    ids: HashMap<Arc<str>, StateId>,
}

impl InterningStateIdRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct names interned so far.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if nothing has been interned yet.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl StateIdRegistry for InterningStateIdRegistry {
    fn get(&mut self, name: &str) -> StateId {
        if let Some(id) = self.ids.get(name) {
            return id.clone();
        }
        let id = StateId::new(name);
        self.ids.insert(id.0.clone(), id.clone());
        id
    }

    fn has(&self, name: &str) -> bool {
        self.ids.contains_key(name)
    }
}

/// Interning registry that records every requested name in first-seen order.
///
/// # Examples
///
/// ```
/// use sch_fsm::{ReferenceTrackingStateIdRegistry, StateIdRegistry};
///
/// let mut ids = ReferenceTrackingStateIdRegistry::new();
/// ids.get("b");
/// ids.get("a");
/// ids.get("b");
///
/// let names: Vec<&str> = ids.references().iter().map(|id| id.name()).collect();
/// assert_eq!(names, vec!["b", "a"]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct ReferenceTrackingStateIdRegistry {
    inner: InterningStateIdRegistry,
    references: Vec<StateId>,
}

impl ReferenceTrackingStateIdRegistry {
    /// Creates an empty tracking registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// De-duplicated ids requested so far, in first-seen order.
    pub fn references(&self) -> &[StateId] {
        &self.references
    }

    /// Consumes the registry, returning the recorded references.
    pub fn into_references(self) -> Vec<StateId> {
        self.references
    }
}

impl StateIdRegistry for ReferenceTrackingStateIdRegistry {
    fn get(&mut self, name: &str) -> StateId {
        if !self.inner.has(name) {
            let id = self.inner.get(name);
            self.references.push(id.clone());
            return id;
        }
        self.inner.get(name)
    }

    fn has(&self, name: &str) -> bool {
        self.inner.has(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interning_returns_same_identity() {
        let mut ids = InterningStateIdRegistry::new();
        let first = ids.get("done");
        let second = ids.get("done");

        assert!(first.ptr_eq(&second));
        assert_eq!(ids.len(), 1);
    }

    #[test]
    fn test_has_is_false_before_get() {
        let mut ids = InterningStateIdRegistry::new();
        assert!(!ids.has("initial"));
        ids.get("initial");
        assert!(ids.has("initial"));
    }

    #[test]
    fn test_ids_from_different_registries_are_equal_but_distinct() {
        let mut left = InterningStateIdRegistry::new();
        let mut right = InterningStateIdRegistry::new();
        let a = left.get("x");
        let b = right.get("x");

        assert_eq!(a, b);
        assert!(!a.ptr_eq(&b));
    }

    #[test]
    fn test_tracking_registry_deduplicates_references() {
        let mut ids = ReferenceTrackingStateIdRegistry::new();
        let a = ids.get("a");
        ids.get("c");
        let again = ids.get("a");

        assert!(a.ptr_eq(&again));
        assert_eq!(
            ids.into_references(),
            vec![StateId::new("a"), StateId::new("c")]
        );
    }
}
