//! Membership filter orchestration (`IN` / `NOT IN`).
//!
//! Per call: deduplicate, then pick one of three strategies:
//! - empty set: a constant (`False` for IN, `True` for NOT IN)
//! - more unique values than the fallback threshold: one native `InList`
//! - otherwise: bucketize, build a balanced OR-tree of equality leaves
//!
//! NOT IN wraps whichever predicate IN would produce in a single root `Not`.

mod source;

pub use source::FilteredSource;

use crate::{
    DEFAULT_FALLBACK_THRESHOLD,
    bucket::{Bucketizer, DEFAULT_BUCKETIZER, WellKnownBucketizer, bucketize},
    config::{ConfigError, FilterConfig},
    dedupe::dedupe,
    error::InternalError,
    field::FieldRef,
    obs::sink::{self, FilterKind, FilterPath, MetricsEvent},
    predicate::Predicate,
    tree::build_or_tree,
};
use std::{fmt, hash::Hash, ops::Deref, sync::Arc};

///
/// MembershipFilter
///
/// Carries the tunables for membership predicate construction: the
/// fallback threshold and the bucketization policy.
/// Cheap to clone and safe to share between threads.
///

#[derive(Clone)]
pub struct MembershipFilter {
    fallback_threshold: usize,
    bucketizer: PolicyRef,
}

impl MembershipFilter {
    /// Filter with the default threshold and the shared default bucketizer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fallback_threshold: DEFAULT_FALLBACK_THRESHOLD,
            bucketizer: PolicyRef::Static(&DEFAULT_BUCKETIZER),
        }
    }

    /// Build a filter from validated config.
    pub fn from_config(config: &FilterConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self::new()
            .with_fallback_threshold(config.fallback_threshold)
            .with_bucketizer(WellKnownBucketizer::new(config.well_known_sizes.clone())))
    }

    #[must_use]
    pub fn with_fallback_threshold(mut self, threshold: usize) -> Self {
        self.fallback_threshold = threshold;
        self
    }

    /// Replace the bucketization policy.
    #[must_use]
    pub fn with_bucketizer(mut self, bucketizer: impl Bucketizer + 'static) -> Self {
        self.bucketizer = PolicyRef::Shared(Arc::new(bucketizer));
        self
    }

    /// Replace the bucketization policy with a process-wide instance.
    #[must_use]
    pub fn with_static_bucketizer(mut self, bucketizer: &'static dyn Bucketizer) -> Self {
        self.bucketizer = PolicyRef::Static(bucketizer);
        self
    }

    #[must_use]
    pub const fn fallback_threshold(&self) -> usize {
        self.fallback_threshold
    }

    #[must_use]
    pub fn bucketizer(&self) -> &dyn Bucketizer {
        &*self.bucketizer
    }

    // ------------------------------------------------------------------
    // Predicate construction
    // ------------------------------------------------------------------

    /// Predicate matching records whose field equals one of `values`.
    pub fn predicate_in<T, K, I>(
        &self,
        field: FieldRef<T, K>,
        values: I,
    ) -> Result<Predicate<T, K>, InternalError>
    where
        K: Clone + Eq + Hash,
        I: IntoIterator<Item = K>,
    {
        self.compile(FilterKind::In, field, values)
    }

    /// Predicate matching records whose field equals none of `values`.
    pub fn predicate_not_in<T, K, I>(
        &self,
        field: FieldRef<T, K>,
        values: I,
    ) -> Result<Predicate<T, K>, InternalError>
    where
        K: Clone + Eq + Hash,
        I: IntoIterator<Item = K>,
    {
        self.compile(FilterKind::NotIn, field, values)
    }

    /// Attach an IN filter to `source`.
    pub fn where_in<S, T, K, I>(
        &self,
        source: S,
        field: FieldRef<T, K>,
        values: I,
    ) -> Result<FilteredSource<S, T, K>, InternalError>
    where
        K: Clone + Eq + Hash,
        I: IntoIterator<Item = K>,
    {
        let predicate = self.predicate_in(field, values)?;

        Ok(FilteredSource::new(source, predicate))
    }

    /// Attach a NOT IN filter to `source`.
    pub fn where_not_in<S, T, K, I>(
        &self,
        source: S,
        field: FieldRef<T, K>,
        values: I,
    ) -> Result<FilteredSource<S, T, K>, InternalError>
    where
        K: Clone + Eq + Hash,
        I: IntoIterator<Item = K>,
    {
        let predicate = self.predicate_not_in(field, values)?;

        Ok(FilteredSource::new(source, predicate))
    }

    fn compile<T, K, I>(
        &self,
        kind: FilterKind,
        field: FieldRef<T, K>,
        values: I,
    ) -> Result<Predicate<T, K>, InternalError>
    where
        K: Clone + Eq + Hash,
        I: IntoIterator<Item = K>,
    {
        let mut input = 0usize;
        let unique = dedupe(values.into_iter().inspect(|_| input += 1));
        sink::record(MetricsEvent::Dedupe {
            input,
            unique: unique.len(),
        });

        let (path, matched) = if unique.is_empty() {
            (FilterPath::Empty, Predicate::False)
        } else if unique.len() > self.fallback_threshold {
            let path = FilterPath::Fallback {
                values: unique.len(),
            };

            (path, field.in_list(unique.into_vec()))
        } else {
            let padded = bucketize(self.bucketizer(), unique)?;
            let path = FilterPath::Tree {
                bucket: padded.len(),
            };
            let leaves = padded.into_iter().map(|value| field.eq(value)).collect();

            (path, build_or_tree(leaves)?)
        };

        tracing::debug!(
            kind = ?kind,
            field = field.name(),
            input,
            path = ?path,
            "compiled membership predicate"
        );
        sink::record(MetricsEvent::Filter { kind, path });

        Ok(match (kind, path) {
            (FilterKind::In, _) => matched,
            // NOT IN over nothing excludes nothing.
            (FilterKind::NotIn, FilterPath::Empty) => Predicate::True,
            (FilterKind::NotIn, _) => Predicate::not(matched),
        })
    }
}

impl Default for MembershipFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MembershipFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MembershipFilter")
            .field("fallback_threshold", &self.fallback_threshold)
            .finish_non_exhaustive()
    }
}

///
/// PolicyRef
///
/// Either the shared process-wide default or a caller-supplied policy.
///

#[derive(Clone)]
enum PolicyRef {
    Static(&'static dyn Bucketizer),
    Shared(Arc<dyn Bucketizer>),
}

impl Deref for PolicyRef {
    type Target = dyn Bucketizer;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Static(policy) => *policy,
            Self::Shared(policy) => policy.as_ref(),
        }
    }
}

// ----------------------------------------------------------------------
// Default entry points
// ----------------------------------------------------------------------

/// Attach an IN filter using the default threshold and bucketizer.
pub fn where_in<S, T, K, I>(
    source: S,
    field: FieldRef<T, K>,
    values: I,
) -> Result<FilteredSource<S, T, K>, InternalError>
where
    K: Clone + Eq + Hash,
    I: IntoIterator<Item = K>,
{
    MembershipFilter::new().where_in(source, field, values)
}

/// Attach a NOT IN filter using the default threshold and bucketizer.
pub fn where_not_in<S, T, K, I>(
    source: S,
    field: FieldRef<T, K>,
    values: I,
) -> Result<FilteredSource<S, T, K>, InternalError>
where
    K: Clone + Eq + Hash,
    I: IntoIterator<Item = K>,
{
    MembershipFilter::new().where_not_in(source, field, values)
}
