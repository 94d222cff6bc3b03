//! Backend lowering seam.
//!
//! The query-execution layer owns translation. It implements
//! [`PredicateLowering`] once for its native filter type, and [`lower`] walks
//! a predicate bottom-up through it. Nothing in this crate serializes a
//! predicate to any backend format.

use crate::{field::FieldRef, predicate::Predicate};

///
/// PredicateLowering
///
/// One callback per predicate variant. Children are lowered before their
/// parent, so `lower_or` and `lower_not` receive already-lowered operands.
///

pub trait PredicateLowering<T, K> {
    type Output;
    type Error;

    fn lower_true(&mut self) -> Result<Self::Output, Self::Error>;

    fn lower_false(&mut self) -> Result<Self::Output, Self::Error>;

    fn lower_eq(&mut self, field: FieldRef<T, K>, value: &K) -> Result<Self::Output, Self::Error>;

    fn lower_or(
        &mut self,
        left: Self::Output,
        right: Self::Output,
    ) -> Result<Self::Output, Self::Error>;

    fn lower_not(&mut self, inner: Self::Output) -> Result<Self::Output, Self::Error>;

    fn lower_in_list(
        &mut self,
        field: FieldRef<T, K>,
        values: &[K],
    ) -> Result<Self::Output, Self::Error>;
}

/// Lower `predicate` through `backend`, left operand before right.
pub fn lower<T, K, L>(predicate: &Predicate<T, K>, backend: &mut L) -> Result<L::Output, L::Error>
where
    L: PredicateLowering<T, K> + ?Sized,
{
    match predicate {
        Predicate::True => backend.lower_true(),
        Predicate::False => backend.lower_false(),
        Predicate::Eq { field, value } => backend.lower_eq(*field, value),
        Predicate::Or(left, right) => {
            let left = lower(left, backend)?;
            let right = lower(right, backend)?;
            backend.lower_or(left, right)
        }
        Predicate::Not(inner) => {
            let inner = lower(inner, backend)?;
            backend.lower_not(inner)
        }
        Predicate::InList { field, values } => backend.lower_in_list(*field, values),
    }
}
