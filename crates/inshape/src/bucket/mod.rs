//! Shape bucketization: pad a deduplicated value set to a canonical size.
//!
//! Across many calls with varying candidate counts the default policy yields
//! O(log max n) distinct sizes, so the generated predicate shapes stay few.


use crate::{WELL_KNOWN_BUCKET_SIZES, dedupe::DedupedValues};
use std::borrow::Cow;
use thiserror::Error as ThisError;

///
/// Bucketizer
///
/// Pluggable bucket-size policy.
/// Implementations must be stateless (or internally synchronized) and must
/// never answer with a size smaller than `n`.
///

pub trait Bucketizer: Send + Sync {
    /// Canonical size for a set of `n` unique values.
    fn bucket_size(&self, n: usize) -> usize;
}

impl<F> Bucketizer for F
where
    F: Fn(usize) -> usize + Send + Sync,
{
    fn bucket_size(&self, n: usize) -> usize {
        self(n)
    }
}

///
/// WellKnownBucketizer
///
/// Default policy: sizes in the well-known list are kept exactly, every
/// other size rounds up to the next power of two (minimum 1).
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WellKnownBucketizer {
    sizes: Cow<'static, [usize]>,
}

/// Shared default bucketizer; holds no mutable state.
pub static DEFAULT_BUCKETIZER: WellKnownBucketizer = WellKnownBucketizer::DEFAULT;

impl WellKnownBucketizer {
    pub const DEFAULT: Self = Self {
        sizes: Cow::Borrowed(&WELL_KNOWN_BUCKET_SIZES),
    };

    /// Build a policy over a custom well-known size list.
    #[must_use]
    pub fn new(sizes: impl Into<Vec<usize>>) -> Self {
        let mut sizes = sizes.into();
        sizes.sort_unstable();
        sizes.dedup();

        Self {
            sizes: Cow::Owned(sizes),
        }
    }

    /// Return the well-known sizes this policy preserves.
    #[must_use]
    pub fn well_known_sizes(&self) -> &[usize] {
        &self.sizes
    }

    #[must_use]
    pub fn is_well_known(&self, n: usize) -> bool {
        self.sizes.contains(&n)
    }
}

impl Default for WellKnownBucketizer {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Bucketizer for WellKnownBucketizer {
    fn bucket_size(&self, n: usize) -> usize {
        if self.is_well_known(n) {
            return n;
        }

        // next_power_of_two overflows past usize::MAX / 2 + 1; keep n there
        n.max(1).checked_next_power_of_two().unwrap_or(n)
    }
}

///
/// ExactBucketizer
///
/// Identity policy: never pads.
/// Every distinct count produces a distinct shape, so this is only useful
/// for tests and for backends without a shape-keyed plan cache.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ExactBucketizer;

impl Bucketizer for ExactBucketizer {
    fn bucket_size(&self, n: usize) -> usize {
        n
    }
}

///
/// BucketError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum BucketError {
    #[error("bucketizer returned size {bucket} for {values} values; bucket must hold every value")]
    Undersized { values: usize, bucket: usize },
}

/// Pad deduplicated values to the size chosen by `policy`.
///
/// The first `n` slots keep the values in order; the remaining slots repeat
/// the first value. An empty input is returned empty whatever the policy says,
/// since there is nothing to repeat.
pub fn bucketize<K: Clone>(
    policy: &dyn Bucketizer,
    values: DedupedValues<K>,
) -> Result<Vec<K>, BucketError> {
    let n = values.len();
    let mut values = values.into_vec();

    if n == 0 {
        return Ok(values);
    }

    let bucket = policy.bucket_size(n);
    if bucket < n {
        return Err(BucketError::Undersized { values: n, bucket });
    }

    tracing::trace!(values = n, bucket, "bucketized candidate set");

    if bucket > n {
        let first = values[0].clone();
        values.resize(bucket, first);
    }

    Ok(values)
}
