/*!
 * Contention Benchmarks
 *
 * Compare add throughput across disciplines, sequentially and under
 * escalating worker counts
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;
use uniq_list::{measure, Discipline, Sequence, StressConfig};

fn bench_sequential_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequential_add");

    for discipline in Discipline::ALL {
        group.bench_with_input(
            BenchmarkId::from_parameter(discipline),
            &discipline,
            |b, &discipline| {
                b.iter(|| {
                    let list = discipline.build::<u32>();
                    for value in 0..64u32 {
                        black_box(list.add(value));
                    }
                });
            },
        );
    }

    group.finish();
}

fn bench_duplicate_rejection(c: &mut Criterion) {
    let mut group = c.benchmark_group("duplicate_rejection");

    for discipline in Discipline::ALL {
        group.bench_with_input(
            BenchmarkId::from_parameter(discipline),
            &discipline,
            |b, &discipline| {
                let list = discipline.build::<u32>();
                for value in 0..128u32 {
                    list.add(value);
                }

                // Rejection leaves the list unchanged, so the same
                // probe works for every iteration
                b.iter(|| black_box(list.add(64)));
            },
        );
    }

    group.finish();
}

fn bench_contended_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("contended_add");
    let values: Vec<u32> = (0..8).collect();

    for discipline in Discipline::ALL {
        for workers in [2, 4, 8] {
            let config = StressConfig {
                workers,
                rounds: 20,
                ..StressConfig::quick()
            };

            group.bench_with_input(
                BenchmarkId::new(discipline.name(), workers),
                &config,
                |b, config| {
                    b.iter(|| black_box(measure(discipline, config.workers, config, &values)));
                },
            );
        }
    }

    group.finish();
}

fn bench_slow_store_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("slow_store_serialization");

    for discipline in [
        Discipline::WholeOpMutex,
        Discipline::CasSpin,
        Discipline::AdaptiveFlag,
    ] {
        let config = StressConfig {
            workers: 4,
            rounds: 2,
            store_latency: Some(Duration::from_micros(500)),
            ..StressConfig::quick()
        };

        group.bench_with_input(
            BenchmarkId::from_parameter(discipline),
            &config,
            |b, config| {
                b.iter(|| black_box(measure(discipline, config.workers, config, &[1u32, 2])));
            },
        );
    }

    group.finish();
}

fn bench_store_scan(c: &mut Criterion) {
    c.bench_function("contains_at_depth_1024", |b| {
        let store: Sequence<u32> = Sequence::new();
        for value in 0..1024 {
            store.append(value);
        }

        b.iter(|| black_box(store.contains(&512)));
    });
}

criterion_group!(
    benches,
    bench_sequential_add,
    bench_duplicate_rejection,
    bench_contended_add,
    bench_slow_store_serialization,
    bench_store_scan
);

criterion_main!(benches);
