//! Hierarchical name lookup.
//!
//! A [`Registry`] maps names to entries or to nested registries, plus an
//! optional default entry. It is how a program maps a resolved command path
//! to whatever it associates with that command, typically a handler.

use std::collections::BTreeMap;

use crate::error::RegistryError;

#[derive(Debug, Clone)]
enum Node<T> {
    Entry(T),
    Registry(Registry<T>),
}

/// Immutable name tree with an optional default entry.
///
/// # Examples
///
/// ```
/// use sch_cli_opts::Registry;
///
/// let log = Registry::builder().entry("init", "log-init")?.build();
/// let registry = Registry::builder()
///     .default("help")?
///     .registry("log", log)?
///     .build();
///
/// assert_eq!(registry.find(&["log", "init"]), Some(&"log-init"));
/// assert_eq!(registry.find::<&str>(&[]), Some(&"help"));
/// assert_eq!(registry.find(&["log"]), None);
/// assert_eq!(registry.find(&["unknown"]), None);
/// # Ok::<(), sch_cli_opts::RegistryError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Registry<T> {
    default: Option<T>,
    nodes: BTreeMap<String, Node<T>>,
}

impl<T> Registry<T> {
    /// Starts an empty builder.
    pub fn builder() -> RegistryBuilder<T> {
        RegistryBuilder::new()
    }

    /// The entry returned for an empty path.
    pub fn default_entry(&self) -> Option<&T> {
        self.default.as_ref()
    }

    /// Registered names at this level, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Whether nothing is registered, default included.
    pub fn is_empty(&self) -> bool {
        self.default.is_none() && self.nodes.is_empty()
    }

    /// Resolves a path.
    ///
    /// An empty path yields the default entry. Otherwise the head must name
    /// an entry, which is returned only when it is the last segment, or a
    /// sub-registry, which resolves the rest of the path. Anything else is
    /// `None`; defaults are not used as fallbacks for unknown names.
    pub fn find<S: AsRef<str>>(&self, path: &[S]) -> Option<&T> {
        let mut registry = self;
        let mut path = path;
        loop {
            let Some((head, rest)) = path.split_first() else {
                return registry.default.as_ref();
            };
            match registry.nodes.get(head.as_ref())? {
                Node::Entry(entry) => return rest.is_empty().then_some(entry),
                Node::Registry(child) => {
                    registry = child;
                    path = rest;
                }
            }
        }
    }
}

/// Builder for [`Registry`]; names may be registered once per level.
#[derive(Debug)]
pub struct RegistryBuilder<T> {
    default: Option<T>,
    nodes: BTreeMap<String, Node<T>>,
}

impl<T> Default for RegistryBuilder<T> {
    fn default() -> Self {
        Self {
            default: None,
            nodes: BTreeMap::new(),
        }
    }
}

impl<T> RegistryBuilder<T> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        <Self as Default>::default()
    }

    /// Sets the entry returned for an empty path.
    ///
    /// # Errors
    ///
    /// [`RegistryError::DuplicateDefault`] if a default is already set.
    pub fn default(mut self, entry: T) -> Result<Self, RegistryError> {
        if self.default.is_some() {
            return Err(RegistryError::DuplicateDefault);
        }
        self.default = Some(entry);
        Ok(self)
    }

    /// Registers an entry under `name`.
    ///
    /// # Errors
    ///
    /// [`RegistryError::DuplicateName`] if `name` is taken at this level.
    pub fn entry(self, name: &str, entry: T) -> Result<Self, RegistryError> {
        self.insert(name, Node::Entry(entry))
    }

    /// Nests a registry under `name`.
    ///
    /// # Errors
    ///
    /// [`RegistryError::DuplicateName`] if `name` is taken at this level.
    pub fn registry(self, name: &str, registry: Registry<T>) -> Result<Self, RegistryError> {
        self.insert(name, Node::Registry(registry))
    }

    /// Finishes the registry.
    pub fn build(self) -> Registry<T> {
        Registry {
            default: self.default,
            nodes: self.nodes,
        }
    }

    fn insert(mut self, name: &str, node: Node<T>) -> Result<Self, RegistryError> {
        if self.nodes.contains_key(name) {
            return Err(RegistryError::DuplicateName(name.to_string()));
        }
        self.nodes.insert(name.to_string(), node);
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY: [&str; 0] = [];

    fn sample() -> Registry<u32> {
        let remote = Registry::builder().default(30).unwrap().entry("push", 31).unwrap().build();
        let log = Registry::builder()
            .entry("init", 20)
            .unwrap()
            .registry("remote", remote)
            .unwrap()
            .build();
        Registry::builder()
            .default(1)
            .unwrap()
            .entry("version", 2)
            .unwrap()
            .registry("log", log)
            .unwrap()
            .build()
    }

    #[test]
    fn test_empty_path_returns_default() {
        assert_eq!(sample().find(&EMPTY), Some(&1));
    }

    #[test]
    fn test_nested_lookup() {
        let registry = sample();
        assert_eq!(registry.find(&["version"]), Some(&2));
        assert_eq!(registry.find(&["log", "init"]), Some(&20));
        assert_eq!(registry.find(&["log", "remote", "push"]), Some(&31));
    }

    #[test]
    fn test_path_ending_on_registry_uses_its_default() {
        let registry = sample();
        assert_eq!(registry.find(&["log", "remote"]), Some(&30));
        assert_eq!(registry.find(&["log"]), None);
    }

    #[test]
    fn test_unknown_names_do_not_fall_back_to_default() {
        let registry = sample();
        assert_eq!(registry.find(&["missing"]), None);
        assert_eq!(registry.find(&["log", "missing"]), None);
        assert_eq!(registry.find(&["version", "extra"]), None);
    }

    #[test]
    fn test_duplicates_rejected() {
        let err = Registry::builder().entry("a", 1).unwrap().entry("a", 2).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateName("a".into()));

        let nested = Registry::<i32>::builder().build();
        let err = Registry::builder().entry("a", 1).unwrap().registry("a", nested).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateName("a".into()));

        let err = Registry::builder().default(1).unwrap().default(2).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateDefault);
    }

    #[test]
    fn test_names_are_sorted() {
        let registry = sample();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["log", "version"]);
        assert!(Registry::<u8>::builder().build().is_empty());
    }
}
