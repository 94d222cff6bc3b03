use super::*;
use crate::{field::FieldRef, filter::MembershipFilter};
use std::cell::RefCell;

struct Ticket {
    queue: u16,
}

const QUEUE: FieldRef<Ticket, u16> = FieldRef::new("queue", |t: &Ticket| t.queue);

#[derive(Default)]
struct CountingSink {
    events: RefCell<Vec<MetricsEvent>>,
}

impl MetricsSink for CountingSink {
    fn record(&self, event: MetricsEvent) {
        self.events.borrow_mut().push(event);
    }
}

#[test]
fn default_sink_accumulates_counters() {
    metrics_reset_all();

    let filter = MembershipFilter::new().with_fallback_threshold(100);
    filter.predicate_in(QUEUE, [1, 1, 2]).expect("in");
    filter.predicate_in(QUEUE, 0..3).expect("in");
    filter.predicate_not_in(QUEUE, 0..60).expect("not in");
    filter.predicate_not_in(QUEUE, Vec::new()).expect("not in");
    filter.predicate_in(QUEUE, 0..101).expect("in");

    let report = metrics_report();
    let ops = &report.counters.ops;

    assert_eq!(ops.in_calls, 3);
    assert_eq!(ops.not_in_calls, 2);
    assert_eq!(ops.empty_sets, 1);
    assert_eq!(ops.tree_paths, 3);
    assert_eq!(ops.fallback_paths, 1);
    assert_eq!(ops.values_in, 3 + 3 + 60 + 101);
    assert_eq!(ops.values_unique, 2 + 3 + 60 + 101);
    assert_eq!(ops.trees_built, 3);
    assert_eq!(ops.leaves_built, 2 + 4 + 64);

    assert_eq!(report.distinct_shapes, 3);
    assert_eq!(report.counters.buckets.get(&64), Some(&1));

    metrics_reset_all();
    assert_eq!(metrics_report(), EventReport::default());
}

#[test]
fn override_sink_captures_events_instead_of_counters() {
    metrics_reset_all();
    let sink = CountingSink::default();

    with_metrics_sink(&sink, || {
        MembershipFilter::new()
            .predicate_in(QUEUE, [4, 5])
            .expect("in");
    });

    assert_eq!(
        *sink.events.borrow(),
        vec![
            MetricsEvent::Dedupe {
                input: 2,
                unique: 2
            },
            MetricsEvent::TreeBuilt { leaves: 2 },
            MetricsEvent::Filter {
                kind: FilterKind::In,
                path: FilterPath::Tree { bucket: 2 },
            },
        ]
    );
    assert_eq!(metrics_report().counters.ops.in_calls, 0);
}

#[test]
fn override_is_restored_after_panic() {
    metrics_reset_all();
    let sink = CountingSink::default();

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        with_metrics_sink(&sink, || panic!("boom"));
    }));
    assert!(result.is_err());

    MembershipFilter::new()
        .predicate_in(QUEUE, [1])
        .expect("in");

    assert!(sink.events.borrow().is_empty());
    assert_eq!(metrics_report().counters.ops.in_calls, 1);
}

#[test]
fn report_serializes_to_json() {
    metrics_reset_all();
    MembershipFilter::new()
        .predicate_in(QUEUE, [1, 2, 3])
        .expect("in");

    let json = serde_json::to_string(&metrics_report()).expect("json");
    let parsed: EventReport = serde_json::from_str(&json).expect("parse");

    assert_eq!(parsed, metrics_report());
    assert_eq!(parsed.counters.buckets.get(&4), Some(&1));
}
