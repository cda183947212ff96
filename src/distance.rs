use ndarray::{Array1, ArrayView1, ArrayView2};
use rayon::prelude::*;

/// Compute the squared Euclidean distance between two vectors
#[inline]
pub fn squared_distance(a: &ArrayView1<f32>, b: &ArrayView1<f32>) -> f32 {
    let mut dist = 0.0f32;
    for j in 0..a.len() {
        let d = a[j] - b[j];
        dist += d * d;
    }
    dist
}

/// Find the nearest centroid for a single point under squared Euclidean distance
///
/// Ties break to the lowest centroid index: only a strictly smaller distance
/// replaces the current best.
///
/// # Returns
/// * `(index, distance)` - index of the nearest centroid and the squared distance to it
#[inline]
pub fn nearest_centroid(point: &ArrayView1<f32>, centroids: &ArrayView2<f32>) -> (usize, f32) {
    let mut best_idx = 0;
    let mut best_dist = f32::INFINITY;

    for (idx, centroid) in centroids.outer_iter().enumerate() {
        let dist = squared_distance(point, &centroid);
        if dist < best_dist {
            best_dist = dist;
            best_idx = idx;
        }
    }

    (best_idx, best_dist)
}

/// Assign every point to its nearest centroid
///
/// The per-point search runs in parallel; `collect` preserves input order, so
/// the result is deterministic for a given input.
///
/// # Arguments
/// * `data` - Input points (n_samples, n_features)
/// * `centroids` - Current centroids (k, n_features)
///
/// # Returns
/// * `(labels, inertia)` - one label per point, plus the sum of squared
///   distances of every point to its assigned centroid
pub fn assign_points(data: &ArrayView2<f32>, centroids: &ArrayView2<f32>) -> (Array1<i64>, f64) {
    let n_samples = data.nrows();

    let assignments: Vec<(i64, f64)> = (0..n_samples)
        .into_par_iter()
        .map(|i| {
            let (idx, dist) = nearest_centroid(&data.row(i), centroids);
            (idx as i64, dist as f64)
        })
        .collect();

    let mut labels = Array1::zeros(n_samples);
    let mut inertia = 0.0f64;
    for (i, &(label, dist)) in assignments.iter().enumerate() {
        labels[i] = label;
        inertia += dist;
    }

    (labels, inertia)
}
