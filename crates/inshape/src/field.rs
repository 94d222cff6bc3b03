use crate::predicate::Predicate;
use std::{
    fmt,
    hash::{Hash, Hasher},
};

///
/// FieldRef
///
/// Zero-cost reference to a record field used in predicates.
/// Carries the native field name (what a backend adapter lowers to) and a
/// plain accessor (what the in-memory evaluator reads). Copyable and compared
/// by name only, so the same token can be embedded in every generated leaf.
///

pub struct FieldRef<T, K> {
    name: &'static str,
    get: fn(&T) -> K,
}

impl<T, K> FieldRef<T, K> {
    /// Create a new field reference.
    #[must_use]
    pub const fn new(name: &'static str, get: fn(&T) -> K) -> Self {
        Self { name, get }
    }

    /// Return the native field name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.name
    }

    /// Read this field from a record.
    #[must_use]
    pub fn read(self, record: &T) -> K {
        (self.get)(record)
    }

    /// Strict equality leaf against a single value.
    #[must_use]
    pub const fn eq(self, value: K) -> Predicate<T, K> {
        Predicate::Eq { field: self, value }
    }

    /// Native membership test against a fixed list.
    #[must_use]
    pub const fn in_list(self, values: Vec<K>) -> Predicate<T, K> {
        Predicate::InList {
            field: self,
            values,
        }
    }
}

// ----------------------------------------------------------------------
// Boundary traits
// ----------------------------------------------------------------------
// Implemented by hand so records and keys need no Clone/Debug/Eq bounds.

impl<T, K> Clone for FieldRef<T, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, K> Copy for FieldRef<T, K> {}

impl<T, K> PartialEq for FieldRef<T, K> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<T, K> Eq for FieldRef<T, K> {}

impl<T, K> Hash for FieldRef<T, K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl<T, K> fmt::Debug for FieldRef<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FieldRef").field(&self.name).finish()
    }
}

impl<T, K> AsRef<str> for FieldRef<T, K> {
    fn as_ref(&self) -> &str {
        self.name
    }
}
