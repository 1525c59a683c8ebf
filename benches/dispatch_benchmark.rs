//! Benchmarks for realtime frame handling
//!
//! Measures envelope parsing and listener fan-out for typical frame sizes.
//! Run with: cargo bench

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use secops::realtime::{Envelope, ListenerRegistry};
use serde_json::{json, Value};

/// An `update` frame carrying `events` alert records
fn update_frame(events: usize) -> String {
    let alerts: Vec<Value> = (0..events)
        .map(|i| {
            json!({
                "id": i,
                "severity": "high",
                "rule": "Multiple failed logins",
                "source_ip": "10.0.0.12",
                "timestamp": "2024-03-01T10:15:30"
            })
        })
        .collect();
    Envelope::new("update", json!({"channel": "alerts", "alerts": alerts}))
        .to_json()
        .unwrap_or_default()
}

fn bench_envelope_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("envelope_parse");

    for events in [1, 10, 100].iter() {
        let frame = update_frame(*events);
        group.throughput(Throughput::Bytes(frame.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(events), &frame, |b, frame| {
            b.iter(|| Envelope::parse(black_box(frame)))
        });
    }

    group.finish();
}

fn bench_listener_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("listener_dispatch");
    let payload = json!({"id": 1});

    for listeners in [1, 8, 64].iter() {
        let registry = ListenerRegistry::new();
        let calls = Arc::new(AtomicUsize::new(0));
        for _ in 0..*listeners {
            let calls = calls.clone();
            registry.add(
                "update",
                Arc::new(move |_: &Value| {
                    calls.fetch_add(1, Ordering::Relaxed);
                }),
            );
        }

        group.throughput(Throughput::Elements(*listeners as u64));
        group.bench_with_input(BenchmarkId::from_parameter(listeners), &registry, |b, registry| {
            b.iter(|| registry.dispatch(black_box("update"), black_box(&payload)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_envelope_parse, bench_listener_dispatch);
criterion_main!(benches);
