//! Persistent scope tables.
//!
//! [`ScopeTable`] is the one name→value mapping every pass uses, whether it
//! binds names to types, declarations, storage locations, or constants.
//!
//! # Persistence
//!
//! The bindings live behind an `Rc`, so cloning a table is O(1) and a clone
//! is never affected by inserts into another clone. [`insert`](ScopeTable::insert)
//! copies the underlying map only when it is shared (copy-on-write). Entering a
//! nested scope is therefore "keep the old table, work on a new one", and
//! leaving it is "drop the new one": the saved table was never mutated, even
//! if the work in between bailed out early.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::Name;

/// A name was already bound in the table it was inserted into.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("`{name}` is already defined in this scope")]
pub struct DuplicateKey {
    pub name: Name,
}

/// Persistent, copy-on-write mapping from [`Name`] to `V`.
pub struct ScopeTable<V> {
    bindings: Rc<FxHashMap<Name, V>>,
}

impl<V> ScopeTable<V> {
    /// The empty table.
    pub fn empty() -> Self {
        ScopeTable {
            bindings: Rc::new(FxHashMap::default()),
        }
    }

    /// Look up the value bound to `name`.
    #[inline]
    pub fn lookup(&self, name: &str) -> Option<&V> {
        self.bindings.get(name)
    }

    /// Check whether `name` is bound.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Iterate all bindings in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&Name, &V)> {
        self.bindings.iter()
    }
}

impl<V: Clone> ScopeTable<V> {
    /// Bind `name`, shadowing any previous binding. Returns the new table.
    #[must_use]
    pub fn insert(mut self, name: Name, value: V) -> Self {
        Rc::make_mut(&mut self.bindings).insert(name, value);
        self
    }

    /// Bind `name` unless it is already bound in this table.
    ///
    /// Leaves `self` untouched either way, so the caller keeps a usable table
    /// after a duplicate.
    pub fn try_insert(&self, name: Name, value: V) -> Result<Self, DuplicateKey> {
        if self.contains(&name) {
            return Err(DuplicateKey { name });
        }
        Ok(self.clone().insert(name, value))
    }

    /// Drop the binding for `name`, if any. Returns the new table.
    #[must_use]
    pub fn remove(mut self, name: &str) -> Self {
        if self.contains(name) {
            Rc::make_mut(&mut self.bindings).remove(name);
        }
        self
    }

    /// Compose this (child) table over `parent`.
    ///
    /// The result holds every binding of both tables; where both bind the
    /// same name, the child's binding wins. Neither input is modified.
    #[must_use]
    pub fn merge(&self, parent: &ScopeTable<V>) -> Self {
        if self.is_empty() {
            return parent.clone();
        }
        let mut merged = parent.clone();
        let map = Rc::make_mut(&mut merged.bindings);
        for (name, value) in self.bindings.iter() {
            map.insert(name.clone(), value.clone());
        }
        merged
    }
}

impl<V> Clone for ScopeTable<V> {
    fn clone(&self) -> Self {
        ScopeTable {
            bindings: Rc::clone(&self.bindings),
        }
    }
}

impl<V> Default for ScopeTable<V> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<V: PartialEq> PartialEq for ScopeTable<V> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.bindings, &other.bindings) || *self.bindings == *other.bindings
    }
}

impl<V: Eq> Eq for ScopeTable<V> {}

impl<V: fmt::Debug> fmt::Debug for ScopeTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<_> = self.bindings.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        f.debug_map().entries(entries).finish()
    }
}

impl<V: Clone> FromIterator<(Name, V)> for ScopeTable<V> {
    fn from_iter<I: IntoIterator<Item = (Name, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |table, (name, value)| table.insert(name, value))
    }
}
