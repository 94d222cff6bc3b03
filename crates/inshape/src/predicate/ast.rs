use crate::field::FieldRef;
use std::fmt;

///
/// Predicate AST
///
/// Small tagged-variant algebra handed to a query-execution layer.
/// Any backend adapter can pattern-match it and lower it to a native filter;
/// this layer knows nothing about translation or execution.
///
/// `Or` is binary on purpose: the tree builder controls the exact shape, and
/// that shape is what backends key their plan caches on.
///

pub enum Predicate<T, K> {
    /// Constant match-all.
    True,
    /// Constant match-nothing.
    False,
    /// Equality leaf: `field = value`.
    Eq { field: FieldRef<T, K>, value: K },
    /// Binary logical OR.
    Or(Box<Self>, Box<Self>),
    /// Logical NOT of the inner predicate.
    Not(Box<Self>),
    /// Native membership test: `field IN (values)`.
    InList {
        field: FieldRef<T, K>,
        values: Vec<K>,
    },
}

impl<T, K> Predicate<T, K> {
    #[must_use]
    pub fn or(left: Self, right: Self) -> Self {
        Self::Or(Box::new(left), Box::new(right))
    }

    #[expect(clippy::should_implement_trait)]
    #[must_use]
    pub fn not(pred: Self) -> Self {
        Self::Not(Box::new(pred))
    }

    /// Returns `true` for the `True` / `False` constants.
    #[must_use]
    pub const fn is_constant(&self) -> bool {
        matches!(self, Self::True | Self::False)
    }
}

// ----------------------------------------------------------------------
// Boundary traits
// ----------------------------------------------------------------------
// Written by hand so the record type needs no Clone/Debug/Eq bounds; only the
// key type does.

impl<T, K: Clone> Clone for Predicate<T, K> {
    fn clone(&self) -> Self {
        match self {
            Self::True => Self::True,
            Self::False => Self::False,
            Self::Eq { field, value } => Self::Eq {
                field: *field,
                value: value.clone(),
            },
            Self::Or(left, right) => Self::Or(left.clone(), right.clone()),
            Self::Not(inner) => Self::Not(inner.clone()),
            Self::InList { field, values } => Self::InList {
                field: *field,
                values: values.clone(),
            },
        }
    }
}

impl<T, K: PartialEq> PartialEq for Predicate<T, K> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::True, Self::True) | (Self::False, Self::False) => true,
            (
                Self::Eq { field, value },
                Self::Eq {
                    field: other_field,
                    value: other_value,
                },
            ) => field == other_field && value == other_value,
            (Self::Or(left, right), Self::Or(other_left, other_right)) => {
                left == other_left && right == other_right
            }
            (Self::Not(inner), Self::Not(other_inner)) => inner == other_inner,
            (
                Self::InList { field, values },
                Self::InList {
                    field: other_field,
                    values: other_values,
                },
            ) => field == other_field && values == other_values,
            _ => false,
        }
    }
}

impl<T, K: Eq> Eq for Predicate<T, K> {}

impl<T, K: fmt::Debug> fmt::Debug for Predicate<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::True => f.write_str("True"),
            Self::False => f.write_str("False"),
            Self::Eq { field, value } => f
                .debug_struct("Eq")
                .field("field", &field.name())
                .field("value", value)
                .finish(),
            Self::Or(left, right) => f.debug_tuple("Or").field(left).field(right).finish(),
            Self::Not(inner) => f.debug_tuple("Not").field(inner).finish(),
            Self::InList { field, values } => f
                .debug_struct("InList")
                .field("field", &field.name())
                .field("values", values)
                .finish(),
        }
    }
}
