//! Materialization benchmarks: rows into columns.

use std::sync::Arc;

use colbatch_bench::fixtures::{generate_orders, generate_text_orders, order_columns, Scale};
use colbatch_core::{infer_schema, materialize, read_text_result, ReadOptions};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn bench_value_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("materialize/values");
    let schema = Arc::new(infer_schema(&order_columns(), &ReadOptions::default()).unwrap());

    for &scale in &[Scale::Small, Scale::Medium] {
        let rows = generate_orders(scale.rows());
        group.throughput(Throughput::Elements(rows.len() as u64));

        group.bench_with_input(BenchmarkId::from_parameter(format!("{:?}", scale)), &rows, |b, rows| {
            b.iter(|| {
                let batch = materialize(schema.clone(), rows.iter().cloned().map(Ok)).unwrap();
                black_box(batch);
            });
        });
    }

    group.finish();
}

fn bench_text_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("materialize/text");
    let columns = order_columns();

    for &scale in &[Scale::Small, Scale::Medium] {
        let rows = generate_text_orders(scale.rows());
        let options = ReadOptions::default().with_capacity_hint(rows.len());
        group.throughput(Throughput::Elements(rows.len() as u64));

        group.bench_with_input(BenchmarkId::from_parameter(format!("{:?}", scale)), &rows, |b, rows| {
            b.iter(|| {
                let batch = read_text_result(&columns, rows.iter().cloned().map(Ok), &options).unwrap();
                black_box(batch);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_value_rows, bench_text_rows);
criterion_main!(benches);
