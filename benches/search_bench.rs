//! Performance benchmarks for search and aggregation.
//!
//! Run with: cargo bench
//!
//! These benchmarks establish baseline performance metrics for:
//! - Filtered search over windows of various lengths
//! - Range statistics over the same windows

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use daylog::model::{CreateEntryRequest, EntryType, SearchMode, SearchRequest};
use daylog::remote::MemoryStore;
use daylog::{Config, LogStorage, RemoteLogStore};

const ENTRIES_PER_DAY: u8 = 8;

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date")
}

/// Seeds `days` consecutive days of entries starting at 2025-01-01.
fn seeded_store(days: i64) -> RemoteLogStore<MemoryStore> {
    let logs = RemoteLogStore::new(MemoryStore::new(), Config::default());
    for offset in 0..days {
        let date = start_date() + Duration::days(offset);
        for n in 0..ENTRIES_PER_DAY {
            let tag = if n % 3 == 0 { "deployment" } else { "meeting" };
            logs.create_entry(CreateEntryRequest {
                date,
                entry_type: EntryType::Activity,
                title: format!("Task {} on {}", n, date),
                description: "Routine work item".to_string(),
                tags: vec![tag.to_string()],
                status: Some(n % 10 + 1),
                ..Default::default()
            })
            .expect("seed entry");
        }
    }
    logs
}

/// Benchmark filtered search with both limit policies.
fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    for days in [7_i64, 30, 90] {
        let logs = seeded_store(days);
        let end = start_date() + Duration::days(days - 1);

        group.throughput(Throughput::Elements(days as u64 * ENTRIES_PER_DAY as u64));
        for mode in [SearchMode::FirstMatches, SearchMode::MostRecent] {
            let request = SearchRequest {
                date_start: Some(start_date()),
                date_end: Some(end),
                tags: vec!["deployment".to_string()],
                status_min: Some(3),
                text: Some("task".to_string()),
                limit: 50,
                mode,
                ..Default::default()
            };
            let id = BenchmarkId::new(format!("{:?}", mode), format!("{}d", days));
            group.bench_with_input(id, &request, |b, request| {
                b.iter(|| {
                    let response = logs.search_logs(black_box(request)).expect("search failed");
                    black_box(response);
                });
            });
        }
    }

    group.finish();
}

/// Benchmark range statistics.
fn bench_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("stats");

    for days in [7_i64, 30, 90] {
        let logs = seeded_store(days);
        let end = start_date() + Duration::days(days - 1);

        group.bench_with_input(BenchmarkId::from_parameter(format!("{}d", days)), &end, |b, end| {
            b.iter(|| {
                let stats = logs
                    .get_stats(black_box(start_date()), black_box(*end))
                    .expect("stats failed");
                black_box(stats);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_search, bench_stats);
criterion_main!(benches);
