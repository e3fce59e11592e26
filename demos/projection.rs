use gradient_pca::linalg::{demean, reconstruction_error};
use gradient_pca::GradientPCA;
use ndarray::Array2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::Normal;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 100 samples scattered around the line y = 0.75x + 3
    let mut rng = ChaCha8Rng::seed_from_u64(666);
    let spread = Normal::new(50.0, 25.0)?;
    let noise = Normal::new(0.0, 5.0)?;
    let mut data = Array2::<f64>::zeros((100, 2));
    for mut row in data.rows_mut() {
        let x: f64 = rng.sample(spread);
        row[0] = x;
        row[1] = 0.75 * x + 3.0 + rng.sample(noise);
    }

    let mut pca = GradientPCA::new(1)?.with_seed(1);
    pca.fit(data.view(), 0.01, 10_000)?;
    println!("{}", pca);
    println!("Components:\n{:?}", pca.components());
    println!("Iterations used: {:?}", pca.iterations_used());
    println!("Explained variance ratio: {:?}", pca.explained_variance_ratio());

    let centered = demean(data.view());
    let reduced = pca.transform(centered.view())?;
    println!("Reduced shape: {:?}", reduced.dim());

    let restored = pca.inverse_transform(reduced.view())?;
    println!(
        "Reconstruction MSE: {:.4}",
        reconstruction_error(centered.view(), restored.view())?
    );
    Ok(())
}
