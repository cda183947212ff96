use crate::config::KMeansConfig;
use crate::distance::assign_points;
use crate::error::Error;
use ndarray::{Array1, Array2, ArrayView2};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Result of one run of Lloyd's algorithm
pub struct LloydResult {
    pub centroids: Array2<f32>,
    pub labels: Array1<i64>,
    pub inertia: f64,
    pub n_iterations: usize,
}

/// Run Lloyd's algorithm on the given vectors
///
/// Centroids are initialized by sampling input rows without replacement with
/// a generator seeded from `config.seed`, so results are repeatable for a
/// fixed seed and input. After every assignment pass each centroid is moved
/// to the rounded mean of its members; the fit stops once the relative
/// decrease in inertia falls below `config.tol` or after `config.max_iters`
/// iterations.
pub fn lloyd(data: &ArrayView2<f32>, config: &KMeansConfig) -> Result<LloydResult, Error> {
    let n_samples = data.nrows();
    let n_features = data.ncols();
    let k = config.n_clusters;

    if n_samples == 0 {
        return Err(Error::EmptyInput);
    }

    if n_samples < k {
        return Err(Error::InvalidClusterCount(format!(
            "Number of input vectors ({}) is less than n_clusters ({})",
            n_samples, k
        )));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut centroids = initialize_centroids(data, k, &mut rng);

    if config.verbose {
        eprintln!(
            "Fitting k-means: {} vectors, {} features, {} clusters",
            n_samples, n_features, k
        );
    }

    let mut labels = Array1::zeros(n_samples);
    let mut inertia = 0.0f64;
    let mut prev_inertia = f64::INFINITY;
    let mut n_iterations = 0;
    let mut converged = false;

    for iteration in 0..config.max_iters {
        n_iterations = iteration + 1;

        let (new_labels, new_inertia) = assign_points(data, &centroids.view());
        labels = new_labels;
        inertia = new_inertia;

        if config.verbose {
            eprintln!(
                "  Iteration {}/{}: inertia = {:.3}",
                n_iterations, config.max_iters, inertia
            );
        }

        // Convergence on relative inertia decrease. The labels from this pass
        // already match the current centroids, so stop before updating them.
        if prev_inertia.is_finite()
            && (prev_inertia == 0.0 || (prev_inertia - inertia) / prev_inertia < config.tol)
        {
            converged = true;
            if config.verbose {
                eprintln!("  Converged after {} iterations", n_iterations);
            }
            break;
        }
        prev_inertia = inertia;

        update_centroids(data, &labels, &mut centroids, &mut rng, config.verbose);
    }

    if !converged {
        // max_iters ended on a centroid update; resync labels and inertia
        // with the final centroids.
        let (final_labels, final_inertia) = assign_points(data, &centroids.view());
        labels = final_labels;
        inertia = final_inertia;
    }

    Ok(LloydResult {
        centroids,
        labels,
        inertia,
        n_iterations,
    })
}

/// Initialize centroids by sampling k input rows without replacement
fn initialize_centroids(data: &ArrayView2<f32>, k: usize, rng: &mut ChaCha8Rng) -> Array2<f32> {
    let n_samples = data.nrows();
    let n_features = data.ncols();

    let indices: Vec<usize> = (0..n_samples).collect();
    let selected: Vec<usize> = indices.choose_multiple(rng, k).cloned().collect();

    let mut centroids = Array2::zeros((k, n_features));
    for (centroid_idx, &data_idx) in selected.iter().enumerate() {
        for j in 0..n_features {
            centroids[[centroid_idx, j]] = data[[data_idx, j]];
        }
    }

    centroids
}

/// Move every centroid to the mean of its assigned vectors
///
/// Means are rounded back into the integer sample domain. Clusters that ended
/// the pass with no members are reseeded from the input so none stays empty.
fn update_centroids(
    data: &ArrayView2<f32>,
    labels: &Array1<i64>,
    centroids: &mut Array2<f32>,
    rng: &mut ChaCha8Rng,
    verbose: bool,
) {
    let (k, n_features) = centroids.dim();

    let mut cluster_sums: Array2<f64> = Array2::zeros((k, n_features));
    let mut cluster_counts = vec![0usize; k];

    for (i, &label) in labels.iter().enumerate() {
        let cluster_idx = label as usize;
        cluster_counts[cluster_idx] += 1;
        for j in 0..n_features {
            cluster_sums[[cluster_idx, j]] += f64::from(data[[i, j]]);
        }
    }

    let mut empty_clusters = Vec::new();
    for cluster_idx in 0..k {
        let count = cluster_counts[cluster_idx];
        if count > 0 {
            for j in 0..n_features {
                centroids[[cluster_idx, j]] =
                    (cluster_sums[[cluster_idx, j]] / count as f64).round() as f32;
            }
        } else {
            empty_clusters.push(cluster_idx);
        }
    }

    if !empty_clusters.is_empty() {
        let indices: Vec<usize> = (0..data.nrows()).collect();
        let random_indices: Vec<usize> = indices
            .choose_multiple(rng, empty_clusters.len())
            .cloned()
            .collect();

        for (i, &cluster_idx) in empty_clusters.iter().enumerate() {
            let data_idx = random_indices[i];
            for j in 0..n_features {
                centroids[[cluster_idx, j]] = data[[data_idx, j]];
            }
        }

        if verbose {
            eprintln!("  Reseeded {} empty clusters", empty_clusters.len());
        }
    }
}
