//! Metrics sink boundary.
//!
//! Compiler logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
//!
//! This module is the only allowed bridge between predicate construction
//! and the thread-local metrics state.
use crate::obs::metrics;
use std::cell::RefCell;

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<*const dyn MetricsSink>> = const { RefCell::new(None) };
}

///
/// FilterKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FilterKind {
    In,
    NotIn,
}

///
/// FilterPath
///
/// Strategy the orchestrator picked for one call.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FilterPath {
    /// No candidates survived deduplication; a constant was emitted.
    Empty,
    /// Bucketized balanced OR-tree of `bucket` leaves.
    Tree { bucket: usize },
    /// Native membership test over `values` unique candidates.
    Fallback { values: usize },
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    Dedupe { input: usize, unique: usize },
    Filter { kind: FilterKind, path: FilterPath },
    TreeBuilt { leaves: usize },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default sink that writes into thread-local metrics state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::Dedupe { input, unique } => {
                metrics::with_state_mut(|m| {
                    m.ops.values_in = m.ops.values_in.saturating_add(as_u64(input));
                    m.ops.values_unique = m.ops.values_unique.saturating_add(as_u64(unique));
                });
            }

            MetricsEvent::Filter { kind, path } => {
                metrics::with_state_mut(|m| {
                    match kind {
                        FilterKind::In => m.ops.in_calls = m.ops.in_calls.saturating_add(1),
                        FilterKind::NotIn => {
                            m.ops.not_in_calls = m.ops.not_in_calls.saturating_add(1);
                        }
                    }

                    match path {
                        FilterPath::Empty => {
                            m.ops.empty_sets = m.ops.empty_sets.saturating_add(1);
                        }
                        FilterPath::Tree { bucket } => {
                            m.ops.tree_paths = m.ops.tree_paths.saturating_add(1);
                            let entry = m.buckets.entry(as_u64(bucket)).or_default();
                            *entry = entry.saturating_add(1);
                        }
                        FilterPath::Fallback { .. } => {
                            m.ops.fallback_paths = m.ops.fallback_paths.saturating_add(1);
                        }
                    }
                });
            }

            MetricsEvent::TreeBuilt { leaves } => {
                metrics::with_state_mut(|m| {
                    m.ops.trees_built = m.ops.trees_built.saturating_add(1);
                    m.ops.leaves_built = m.ops.leaves_built.saturating_add(as_u64(leaves));
                });
            }
        }
    }
}

fn as_u64(n: usize) -> u64 {
    u64::try_from(n).unwrap_or(u64::MAX)
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let override_ptr = SINK_OVERRIDE.with(|cell| *cell.borrow());
    if let Some(ptr) = override_ptr {
        // SAFETY:
        // Preconditions:
        // - `ptr` was produced from a valid `&dyn MetricsSink` in `with_metrics_sink`.
        // - `with_metrics_sink` always restores the previous pointer before returning,
        //   including unwind paths via `Guard::drop`.
        // - `record` is synchronous and never stores `ptr` beyond this call.
        //
        // Aliasing:
        // - Only a shared reference is materialized, matching the shared borrow
        //   used to install the override.
        unsafe { (&*ptr).record(event) };
    } else {
        GLOBAL_METRICS_SINK.record(event);
    }
}

/// Snapshot the current thread's metrics state.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset all metrics state for the current thread.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
///
/// Events recorded on this thread while `f` runs go to `sink` instead of the
/// thread-local counters. Overrides nest; the previous sink is restored on
/// return and on unwind.
pub fn with_metrics_sink<T>(sink: &dyn MetricsSink, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<*const dyn MetricsSink>);

    impl Drop for Guard {
        fn drop(&mut self) {
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = self.0;
            });
        }
    }

    // SAFETY:
    // - `sink_ptr` is installed only for this dynamic scope.
    // - `Guard` always restores the previous slot on all exits, including panic.
    // - `record` only dereferences synchronously and never persists `sink_ptr`.
    let sink_ptr = unsafe { std::mem::transmute::<&dyn MetricsSink, *const dyn MetricsSink>(sink) };
    let prev = SINK_OVERRIDE.with(|cell| {
        let mut slot = cell.borrow_mut();
        slot.replace(sink_ptr)
    });
    let _guard = Guard(prev);

    f()
}
