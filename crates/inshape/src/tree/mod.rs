//! Balanced OR-tree construction over equality leaves.


use crate::{
    obs::sink::{self, MetricsEvent},
    predicate::Predicate,
};
use thiserror::Error as ThisError;

///
/// TreeError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum TreeError {
    #[error("cannot build a predicate tree from zero leaves")]
    Empty,
}

/// Combine leaves into a balanced binary OR-tree.
///
/// Depth is exactly `ceil(log2 m)` for `m` leaves, and leaves keep their
/// left-to-right order. A left-leaning chain would instead nest `m - 1` ORs.
pub fn build_or_tree<T, K>(leaves: Vec<Predicate<T, K>>) -> Result<Predicate<T, K>, TreeError> {
    if leaves.is_empty() {
        return Err(TreeError::Empty);
    }

    sink::record(MetricsEvent::TreeBuilt {
        leaves: leaves.len(),
    });

    let mut slots: Vec<Option<Predicate<T, K>>> = leaves.into_iter().map(Some).collect();
    let len = slots.len();

    build_range(&mut slots, 0, len)
}

// Midpoint split over [from, to); left half is built before the right half.
fn build_range<T, K>(
    slots: &mut [Option<Predicate<T, K>>],
    from: usize,
    to: usize,
) -> Result<Predicate<T, K>, TreeError> {
    if to - from == 1 {
        return slots[from].take().ok_or(TreeError::Empty);
    }

    let mid = from + (to - from) / 2;
    let left = build_range(slots, from, mid)?;
    let right = build_range(slots, mid, to)?;

    Ok(Predicate::or(left, right))
}

///
/// Structural inspection
///
/// Shape queries used by tests and backend adapters that size their
/// parameter lists up front.
///

impl<T, K> Predicate<T, K> {
    /// Number of combinator levels above the deepest leaf.
    ///
    /// Leaves, constants and `InList` have depth 0; `Not` adds no depth, so a
    /// negated tree reports the depth of the tree it wraps.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::True | Self::False | Self::Eq { .. } | Self::InList { .. } => 0,
            Self::Or(left, right) => 1 + left.depth().max(right.depth()),
            Self::Not(inner) => inner.depth(),
        }
    }

    /// Number of `Eq` leaves in the tree.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    /// Iterate the `(field, value)` pairs of `Eq` leaves, left to right.
    pub fn leaves(&self) -> Leaves<'_, T, K> {
        Leaves { stack: vec![self] }
    }
}

///
/// Leaves
///
/// Left-to-right iterator over equality leaves.
///

pub struct Leaves<'a, T, K> {
    stack: Vec<&'a Predicate<T, K>>,
}

impl<'a, T, K> Iterator for Leaves<'a, T, K> {
    type Item = (&'static str, &'a K);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node {
                Predicate::Eq { field, value } => return Some((field.name(), value)),
                Predicate::Or(left, right) => {
                    self.stack.push(right);
                    self.stack.push(left);
                }
                Predicate::Not(inner) => self.stack.push(inner),
                Predicate::True | Predicate::False | Predicate::InList { .. } => {}
            }
        }

        None
    }
}
