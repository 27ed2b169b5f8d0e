/// Bootstrap lift CI benchmarks
///
/// Measures resampling cost across resample counts and sample sizes.
use abtest::analysis::{bootstrap_lift_ci, BootstrapParams, GroupAssignment, Sample};
use abtest::{analyze_groups, AnalysisConfig};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

fn synthetic_groups(n: usize) -> (Vec<f64>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(7);
    let a = (0..n).map(|_| rng.gen_range(50.0..150.0)).collect();
    let b = (0..n).map(|_| rng.gen_range(55.0..160.0)).collect();
    (a, b)
}

/// Benchmark: resample count scaling
fn bench_resample_counts(c: &mut Criterion) {
    let mut group = c.benchmark_group("bootstrap_resamples");
    group.measurement_time(Duration::from_secs(5));

    let (a, b) = synthetic_groups(500);
    for n_boot in [500usize, 1000, 3000, 5000].iter() {
        group.throughput(Throughput::Elements(*n_boot as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n_boot), n_boot, |bench, &n_boot| {
            let params = BootstrapParams::new(n_boot, 0.05, 42);
            bench.iter(|| bootstrap_lift_ci(black_box(&a), black_box(&b), &params));
        });
    }

    group.finish();
}

/// Benchmark: sample size scaling at a fixed resample count
fn bench_sample_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("bootstrap_sample_size");
    group.measurement_time(Duration::from_secs(5));

    for size in [100usize, 1_000, 10_000].iter() {
        let (a, b) = synthetic_groups(*size);
        group.throughput(Throughput::Elements((*size * 2) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |bench, _| {
            let params = BootstrapParams::new(1000, 0.05, 42);
            bench.iter(|| bootstrap_lift_ci(black_box(&a), black_box(&b), &params));
        });
    }

    group.finish();
}

/// Benchmark: full pipeline on pre-split groups
fn bench_full_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis_pipeline");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(30);

    let (a, b) = synthetic_groups(2_000);
    let groups = GroupAssignment {
        a_label: "A".to_string(),
        b_label: "B".to_string(),
        a: Sample::new(a).expect("finite synthetic sample"),
        b: Sample::new(b).expect("finite synthetic sample"),
    };
    let config = AnalysisConfig {
        winsor: 0.01,
        ..AnalysisConfig::quick()
    };
    group.bench_function("winsorized_2000x2", |bench| {
        bench.iter(|| analyze_groups(black_box(&groups), "group", "value", &config));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_resample_counts,
    bench_sample_sizes,
    bench_full_analysis
);
criterion_main!(benches);
