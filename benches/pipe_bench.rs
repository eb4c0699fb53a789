//! Benchmark for fused and eager pipe evaluation.
//!
//! Compares the two fusion modes on chains where a limiter lets fusion skip
//! most of the input, and on chains where every element has to be processed.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use lazypipe::{
    Fusion, Operator, PipeConfig, Pipeline, Value, filter, flat_map, json, map, take, unique,
};
use std::hint::black_box;

fn number(value: &Value) -> i64 {
    value.as_i64().unwrap_or_default()
}

fn source(length: i64) -> Value {
    Value::Array((0..length).map(|value| json!(value)).collect())
}

fn pipeline(operators: Vec<Operator>, fusion: Fusion) -> Pipeline {
    Pipeline::new(operators).with_config(PipeConfig::default().with_fusion(fusion))
}

fn limited_chain() -> Vec<Operator> {
    vec![
        map(|value| json!(number(&value) * 3)),
        filter(|value| number(value) % 2 == 0),
        take(10),
    ]
}

fn full_chain() -> Vec<Operator> {
    vec![
        map(|value| json!(number(&value) + 1)),
        flat_map(|value| json!([value.clone(), value])),
        unique(),
    ]
}

// =============================================================================
// 1. Early termination
// =============================================================================

fn benchmark_limited_chain(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("map_filter_take");

    for length in [100, 10_000] {
        let input = source(length);
        for (label, fusion) in [("fused", Fusion::Enabled), ("eager", Fusion::Disabled)] {
            let evaluator = pipeline(limited_chain(), fusion);
            group.bench_with_input(BenchmarkId::new(label, length), &input, |bencher, input| {
                bencher.iter(|| black_box(evaluator.run(black_box(input.clone()))));
            });
        }
    }

    group.finish();
}

// =============================================================================
// 2. Full traversal
// =============================================================================

fn benchmark_full_chain(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("map_flat_map_unique");

    for length in [100, 10_000] {
        let input = source(length);
        for (label, fusion) in [("fused", Fusion::Enabled), ("eager", Fusion::Disabled)] {
            let evaluator = pipeline(full_chain(), fusion);
            group.bench_with_input(BenchmarkId::new(label, length), &input, |bencher, input| {
                bencher.iter(|| black_box(evaluator.run(black_box(input.clone()))));
            });
        }
    }

    group.finish();
}

criterion_group!(benches, benchmark_limited_chain, benchmark_full_chain);
criterion_main!(benches);
