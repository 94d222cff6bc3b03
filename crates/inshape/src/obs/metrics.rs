use serde::{Deserialize, Serialize};
use std::{cell::RefCell, collections::BTreeMap};

///
/// Metrics
/// Ephemeral, in-memory counters for membership filter construction.
/// State is thread-local; nothing here is shared between callers.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventState {
    pub ops: FilterOps,
    /// Tree-path calls per bucket size; its key count is the number of
    /// distinct predicate shapes handed to backends.
    pub buckets: BTreeMap<u64, u64>,
}

///
/// FilterOps
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct FilterOps {
    // Entrypoints
    pub in_calls: u64,
    pub not_in_calls: u64,

    // Strategy chosen
    pub empty_sets: u64,
    pub tree_paths: u64,
    pub fallback_paths: u64,

    // Candidate values
    pub values_in: u64,
    pub values_unique: u64,

    // Tree construction
    pub trees_built: u64,
    pub leaves_built: u64,
}

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Reset all counters (useful in tests).
pub fn reset() {
    with_state_mut(|m| *m = EventState::default());
}

/// Reset all event state.
pub fn reset_all() {
    reset();
}

///
/// EventReport
/// Point-in-time snapshot of the current thread's counters.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventReport {
    pub counters: EventState,
    /// Distinct bucket sizes used on the tree path.
    pub distinct_shapes: usize,
}

#[must_use]
pub fn report() -> EventReport {
    with_state(|state| EventReport {
        counters: state.clone(),
        distinct_shapes: state.buckets.len(),
    })
}
