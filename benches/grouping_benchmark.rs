//! DNS record grouping benchmarks.
//!
//! Grouping runs on every render of an expanded DNS card, so it should stay
//! well under a frame for large visits.
//!
//! Run with: cargo bench

#![allow(missing_docs)] // criterion macros generate undocumented items

use crawlview::model::{GeoAnnotation, RawRecord, ResponseEntry};
use crawlview::view_state::group;
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

/// Generate `count` records spread over `keys` group keys, every fifth empty.
fn generate_records(count: usize, keys: usize) -> Vec<RawRecord> {
    (0..count)
        .map(|i| {
            let responses = if i % 5 == 4 {
                Vec::new()
            } else {
                vec![ResponseEntry {
                    record_data: format!("10.0.{}.{}", i / 256 % 256, i % 256),
                    geo_annotations: vec![GeoAnnotation {
                        ip: format!("10.0.{}.{}", i / 256 % 256, i % 256),
                        ip_version: "4".to_string(),
                        country: "NL".to_string(),
                        asn: "1136".to_string(),
                        asn_organisation: "KPN".to_string(),
                    }],
                }]
            };
            RawRecord {
                group_key: format!("key-{}", i % keys),
                record_type: "A".to_string(),
                responses,
                ..RawRecord::default()
            }
        })
        .collect()
}

fn benchmark_grouping(c: &mut Criterion) {
    let mut bench = c.benchmark_group("group_records");

    for (count, keys) in [(100, 10), (1_000, 50), (10_000, 500)] {
        let records = generate_records(count, keys);
        bench.bench_with_input(
            BenchmarkId::from_parameter(format!("{count}x{keys}")),
            &records,
            |b, records| {
                b.iter(|| {
                    let grouped = group(black_box(records));
                    black_box(grouped.len())
                })
            },
        );
    }

    bench.finish();
}

criterion_group!(benches, benchmark_grouping);
criterion_main!(benches);
