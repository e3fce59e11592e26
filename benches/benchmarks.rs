use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gradient_pca::GradientPCA;
use ndarray::Array2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::Normal;

/// Gaussian data whose column standard deviations decay linearly, seeded for reproducibility.
/// The decay gives every component a distinct variance so the ascent converges.
fn generate_data(n_samples: usize, n_features: usize, seed: u64) -> Array2<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let normal = Normal::new(0.0, 1.0).unwrap();
    Array2::from_shape_fn((n_samples, n_features), |(_, j)| {
        (n_features - j) as f64 * rng.sample(normal)
    })
}

fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("GradientPCA_fit");
    group.sample_size(20);

    for &(n_samples, n_features, n_components) in [(100, 10, 2), (500, 20, 3), (1000, 50, 5)].iter() {
        let data = generate_data(n_samples, n_features, 42);
        group.throughput(Throughput::Elements((n_samples * n_features) as u64));
        group.bench_with_input(
            BenchmarkId::new("fit", format!("{}x{}_k{}", n_samples, n_features, n_components)),
            &data,
            |b, data_matrix| {
                b.iter_with_setup(
                    || GradientPCA::new(n_components).unwrap().with_seed(7),
                    |mut pca| {
                        pca.fit(data_matrix.view(), 0.01, 10_000).unwrap();
                        pca
                    },
                );
            },
        );
    }
    group.finish();
}

fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("GradientPCA_transform");

    for &(n_samples, n_features) in [(1000, 20), (10_000, 50)].iter() {
        let data = generate_data(n_samples, n_features, 43);
        let mut pca = GradientPCA::new(3).unwrap().with_seed(7);
        pca.fit(data.view(), 0.01, 10_000).unwrap();

        group.throughput(Throughput::Elements((n_samples * n_features) as u64));
        group.bench_with_input(
            BenchmarkId::new("transform", format!("{}x{}", n_samples, n_features)),
            &data,
            |b, data_matrix| b.iter(|| pca.transform(data_matrix.view()).unwrap()),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_fit, bench_transform);
criterion_main!(benches);
