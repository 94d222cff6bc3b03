use crate::predicate::Predicate;
use std::fmt;

///
/// FilteredSource
///
/// Unevaluated filter description: a record source paired with the
/// predicate to apply to it. Execution belongs to the query layer that owns
/// `S`; slices and vectors get a reference in-memory evaluation.
///

pub struct FilteredSource<S, T, K> {
    source: S,
    predicate: Predicate<T, K>,
}

impl<S, T, K> FilteredSource<S, T, K> {
    #[must_use]
    pub const fn new(source: S, predicate: Predicate<T, K>) -> Self {
        Self { source, predicate }
    }

    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    #[must_use]
    pub const fn predicate(&self) -> &Predicate<T, K> {
        &self.predicate
    }

    #[must_use]
    pub fn into_parts(self) -> (S, Predicate<T, K>) {
        (self.source, self.predicate)
    }
}

impl<'a, T, K: PartialEq> FilteredSource<&'a [T], T, K> {
    /// Records of the borrowed slice that satisfy the predicate, in order.
    pub fn rows(&self) -> impl Iterator<Item = &'a T> + '_ {
        self.source
            .iter()
            .filter(|record| self.predicate.eval(record))
    }
}

impl<T, K: PartialEq> FilteredSource<Vec<T>, T, K> {
    /// Consume the source, keeping records that satisfy the predicate.
    #[must_use]
    pub fn into_rows(self) -> Vec<T> {
        let Self { source, predicate } = self;

        source
            .into_iter()
            .filter(|record| predicate.eval(record))
            .collect()
    }
}

impl<S: fmt::Debug, T, K: fmt::Debug> fmt::Debug for FilteredSource<S, T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilteredSource")
            .field("source", &self.source)
            .field("predicate", &self.predicate)
            .finish()
    }
}
