use ahash::AHashSet;
use derive_more::{Deref, IntoIterator};
use std::hash::Hash;

///
/// DedupedValues
///
/// Candidate values with duplicates removed.
/// Deterministic order is first-seen order; order never affects the
/// meaning of the resulting predicate, only its leaf layout.
///

#[repr(transparent)]
#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq)]
pub struct DedupedValues<K>(#[into_iterator(owned, ref)] Vec<K>);

impl<K> DedupedValues<K> {
    /// Return the number of unique values.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no values survived deduplication.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<K> {
        self.0
    }
}

impl<K: Clone + Eq + Hash> FromIterator<K> for DedupedValues<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        dedupe(iter)
    }
}

/// Remove duplicate values, keeping the first occurrence of each.
///
/// Total over any input, including empty and unbounded iterators.
pub fn dedupe<K, I>(values: I) -> DedupedValues<K>
where
    K: Clone + Eq + Hash,
    I: IntoIterator<Item = K>,
{
    let iter = values.into_iter();
    let (lower, _) = iter.size_hint();

    let mut seen = AHashSet::with_capacity(lower);
    let mut out = Vec::with_capacity(lower);
    for value in iter {
        if seen.insert(value.clone()) {
            out.push(value);
        }
    }

    DedupedValues(out)
}
