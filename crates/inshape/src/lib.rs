//! Plan-cache stable membership predicates.
//!
//! `inshape` compiles "field IN (values)" and its NOT IN dual into predicates
//! whose structural shape depends only on a small family of bucket sizes, not
//! on the exact candidate count. Backends that cache compiled plans keyed by
//! predicate shape therefore reuse plans across calls with varying set sizes.
#![warn(unreachable_pub)]

pub mod bucket;
pub mod config;
pub mod dedupe;
pub mod error;
pub mod field;
pub mod filter;
pub mod lower;
pub mod obs;
pub mod predicate;
pub mod tree;

///
/// CONSTANTS
///

/// Deduplicated candidate count above which the native membership fallback
/// replaces the bucketized OR-tree.
pub const DEFAULT_FALLBACK_THRESHOLD: usize = 1024;

/// Candidate counts kept exactly instead of being rounded up to a power of two.
///
/// Observed common set sizes (page sizes and their off-by-one neighbours).
pub const WELL_KNOWN_BUCKET_SIZES: [usize; 5] = [0, 50, 51, 100, 101];

///
/// Prelude
///
/// Prelude contains only domain vocabulary and the two entry points.
///

pub mod prelude {
    pub use crate::{
        bucket::{Bucketizer, DEFAULT_BUCKETIZER},
        field::FieldRef,
        filter::{FilteredSource, MembershipFilter, where_in, where_not_in},
        predicate::Predicate,
    };
}
