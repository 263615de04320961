use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kujibako::sampler::{sample_index, CumulativeWeights};
use kujibako::{Multiset, NativeEq, Recalibration, Value};

fn bench_sample_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampler");
    let sizes = [10, 100, 1000];

    for &size in &sizes {
        let weights: Vec<f64> = (0..size).map(|i| (i % 7) as f64).collect();
        group.bench_function(format!("sample_index_n{}", size), |b| {
            b.iter(|| {
                let _ = black_box(sample_index(black_box(&weights)));
            })
        });

        let cumulative = CumulativeWeights::from_weights(&weights).expect("weights ok");
        group.bench_function(format!("prebuilt_n{}", size), |b| {
            b.iter(|| {
                black_box(cumulative.sample());
            })
        });
    }
    group.finish();
}

fn bench_multiset_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiset_get");
    let sizes = [10, 100, 1000];

    for &size in &sizes {
        let mut lazy: Multiset<u32, NativeEq> = Multiset::with_equivalence(NativeEq);
        for i in 0..size {
            for _ in 0..=(i % 5) {
                lazy.add(i);
            }
        }
        let eager = lazy
            .clone()
            .with_recalibration(Recalibration::Eager { exponent: 1.0 });

        group.bench_function(format!("lazy_n{}", size), |b| {
            b.iter(|| {
                black_box(lazy.get(black_box(1.0)));
            })
        });
        group.bench_function(format!("eager_n{}", size), |b| {
            b.iter(|| {
                black_box(eager.get(black_box(1.0)));
            })
        });
    }
    group.finish();
}

fn bench_deep_equal_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("deep_equal");
    let sizes = [10, 100];

    for &size in &sizes {
        let mut m = Multiset::new();
        for i in 0..size {
            m.add(Value::map([
                ("id", Value::from(i as u32)),
                ("tags", Value::seq(["x", "y"])),
            ]));
        }
        let probe = Value::map([
            ("tags", Value::seq(["x", "y"])),
            ("id", Value::from((size - 1) as u32)),
        ]);
        group.bench_function(format!("count_of_last_n{}", size), |b| {
            b.iter(|| {
                black_box(m.count_of(black_box(&probe)));
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_sample_index,
    bench_multiset_get,
    bench_deep_equal_lookup
);
criterion_main!(benches);
