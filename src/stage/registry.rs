//! Ordered name-to-definition store shared by scenes, transitions and popups.

use log::debug;
use std::collections::BTreeMap;

/// An ordered store of named definitions.
///
/// Names are plain strings and serve as the public identity of everything on
/// the stage. Defining a name that already exists replaces the previous
/// definition (last write wins). There is no way to remove a definition, so a
/// name that was ever defined stays resolvable; lookups by names that never
/// were come back as `None` and callers decide how to degrade.
pub struct Registry<T> {
    entries: BTreeMap<String, T>,
}

impl<T> Registry<T> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Store `definition` under `name`, replacing any previous definition.
    pub fn define(&mut self, name: impl Into<String>, definition: T) {
        let name = name.into();
        if self.entries.contains_key(&name) {
            debug!("'{}' was already defined and has been replaced", name);
        }
        self.entries.insert(name, definition);
    }

    /// Whether a definition exists under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Read the definition stored under `name`.
    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.get(name)
    }

    /// Mutably borrow the definition stored under `name`.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        self.entries.get_mut(name)
    }

    /// Iterate defined names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}
