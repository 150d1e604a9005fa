//! Filter evaluation benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use logsieve_core::query::{sort_records, FilterEvaluator};
use logsieve_core::{FacetCatalogue, QuerySession};
use logsieve_lang::parse;
use logsieve_proto::{Record, SortConfig};

const LEVELS: [&str; 4] = ["debug", "info", "warn", "error"];
const SERVICES: [&str; 3] = ["api", "auth", "billing"];

fn make_logs(count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| {
            Record::new()
                .with_field("time", i as i64)
                .with_field("level", LEVELS[i % LEVELS.len()])
                .with_field("service", SERVICES[i % SERVICES.len()])
                .with_field(
                    "req",
                    Record::new()
                        .with_field("host", format!("db-{}", i % 7))
                        .with_field("ms", (i * 37 % 1000) as i64),
                )
        })
        .collect()
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter/parse");

    group.bench_function("two_clauses", |b| {
        b.iter(|| black_box(parse("status == active AND level > 2")));
    });

    group.bench_function("mixed_joins", |b| {
        b.iter(|| {
            black_box(parse(
                "level == error OR req.ms > 500 XOR service != auth NAND req.host == db-3",
            ))
        });
    });

    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter/evaluate");

    for size in [1_000, 10_000] {
        let logs = make_logs(size);

        let eq = parse("level == error");
        group.bench_with_input(BenchmarkId::new("eq", size), &logs, |b, logs| {
            b.iter(|| black_box(FilterEvaluator::filter_indices(logs, &eq)));
        });

        let nested = parse("req.ms > 500 AND req.host != db-3");
        group.bench_with_input(BenchmarkId::new("nested_range", size), &logs, |b, logs| {
            b.iter(|| black_box(FilterEvaluator::filter_indices(logs, &nested)));
        });
    }

    group.finish();
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter/sort");

    let logs = make_logs(10_000);
    group.bench_function("numeric", |b| {
        let config = SortConfig::desc("req.ms");
        b.iter(|| black_box(sort_records(&logs, &config)));
    });
    group.bench_function("text", |b| {
        let config = SortConfig::asc("service");
        b.iter(|| black_box(sort_records(&logs, &config)));
    });

    group.finish();
}

fn bench_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter/session");

    let logs = make_logs(10_000);
    group.bench_function("facets", |b| {
        b.iter(|| black_box(FacetCatalogue::extract(&logs)));
    });

    group.bench_function("refilter", |b| {
        let mut session = QuerySession::with_records(logs.clone());
        let mut flip = false;
        b.iter(|| {
            flip = !flip;
            let text = if flip { "level == warn" } else { "level == info" };
            session.set_filter_text(text);
            black_box(session.visible_len())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_evaluate, bench_sort, bench_session);
criterion_main!(benches);
