//! Row view benchmarks: memoized conversions back to rows.

use std::collections::HashMap;
use std::sync::Arc;

use colbatch_bench::fixtures::{generate_orders, order_columns, Scale};
use colbatch_core::proto::LogicalType;
use colbatch_core::{read_result, Batch, ColumnarResultView, ReadOptions};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn batch(scale: Scale) -> Arc<Batch> {
    let rows = generate_orders(scale.rows());
    Arc::new(read_result(&order_columns(), rows.into_iter().map(Ok), &ReadOptions::default()).unwrap())
}

fn bench_first_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("view/build");
    let batch = batch(Scale::Medium);

    group.bench_function("rows", |b| {
        b.iter(|| {
            let view = ColumnarResultView::new(batch.clone());
            black_box(view.rows().len());
        });
    });

    group.bench_function("row_mappings", |b| {
        b.iter(|| {
            let view = ColumnarResultView::new(batch.clone());
            black_box(view.to_row_mappings().len());
        });
    });

    group.finish();
}

fn bench_cached_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("view/cached");
    let view = ColumnarResultView::new(batch(Scale::Medium));
    view.to_row_mappings();

    group.bench_function("row_mappings", |b| {
        b.iter(|| black_box(view.to_row_mappings().len()));
    });

    group.bench_function("first", |b| {
        b.iter(|| black_box(view.first()));
    });

    group.finish();
}

fn bench_cast_values(c: &mut Criterion) {
    let mut group = c.benchmark_group("view/cast");
    let view = ColumnarResultView::new(batch(Scale::Medium));
    view.rows();

    let mut compatible = HashMap::new();
    compatible.insert("quantity".to_string(), LogicalType::Integer);
    group.bench_function("compatible", |b| {
        b.iter(|| black_box(view.cast_values(&compatible).unwrap().len()));
    });

    let mut widened = HashMap::new();
    widened.insert("quantity".to_string(), LogicalType::BigInteger);
    widened.insert("price".to_string(), LogicalType::Float);
    group.bench_function("widen", |b| {
        b.iter(|| black_box(view.cast_values(&widened).unwrap().len()));
    });

    group.finish();
}

criterion_group!(benches, bench_first_access, bench_cached_access, bench_cast_values);
criterion_main!(benches);
