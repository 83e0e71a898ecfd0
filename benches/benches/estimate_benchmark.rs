//! Estimator benchmarks over simulated collections.
//!
//! Run with: `cargo bench --package frontier-bench`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use frontier_bench::benchmark_cases;
use frontier_lib::{FrontierEstimator, SimulatedCollection};

fn estimate_benchmark(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("Failed to build tokio runtime");
    let mut group = c.benchmark_group("estimate");

    for case in benchmark_cases() {
        group.bench_with_input(BenchmarkId::from_parameter(case.name), &case, |b, case| {
            b.to_async(&runtime).iter(|| async move {
                let collection = SimulatedCollection::new(case.frontier);
                FrontierEstimator::new(&collection, case.config)
                    .estimate()
                    .await
                    .map(|found| found.estimate)
            });
        });
    }

    group.finish();
}

fn lookup_benchmark(c: &mut Criterion) {
    let collection = SimulatedCollection::new(850_000_000);
    c.bench_function("simulated_lookup", |b| {
        b.iter(|| collection.lookup(std::hint::black_box(1 << 29)));
    });
}

criterion_group!(benches, estimate_benchmark, lookup_benchmark);
criterion_main!(benches);
