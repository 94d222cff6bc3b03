use crate::predicate::Predicate;

impl<T, K: PartialEq> Predicate<T, K> {
    ///
    /// Evaluate this predicate against a single record.
    ///
    /// This is a **reference evaluator**:
    /// - no planning or index logic
    /// - `InList` is a linear scan of its values
    ///
    /// Backends never call this; it exists for tests and for callers that
    /// filter in memory.
    ///
    #[must_use]
    pub fn eval(&self, record: &T) -> bool {
        match self {
            Self::True => true,
            Self::False => false,

            Self::Eq { field, value } => field.read(record) == *value,
            Self::Or(left, right) => left.eval(record) || right.eval(record),
            Self::Not(inner) => !inner.eval(record),

            Self::InList { field, values } => {
                let actual = field.read(record);
                values.iter().any(|value| *value == actual)
            }
        }
    }
}
