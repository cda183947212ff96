use crate::algorithm::{lloyd, LloydResult};
use crate::config::KMeansConfig;
use crate::error::Error;
use crate::pixels::PixelBuffer;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// State produced by a successful fit, replaced wholesale by the next one
struct Fitted {
    colors: Array2<u8>,
    labels: Array1<i64>,
    inertia: f64,
    n_iterations: usize,
}

/// K-means estimator for dominant colors.
///
/// Runs Lloyd's algorithm over a sequence of fixed-length color vectors,
/// usually the pixels of a [`PixelBuffer`], and keeps the resulting cluster
/// center colors and per-pixel labels. Fitting is deterministic for a fixed
/// seed and input. `fit` may be called repeatedly; each successful call fully
/// replaces the previous results, and a failed call leaves them untouched.
///
/// # Example
///
/// ```
/// use dominant_colors::{KMeans, PixelBuffer};
///
/// let pixels = vec![[255u8, 0, 0], [250, 5, 5], [0, 0, 255], [5, 5, 250]];
/// let buffer = PixelBuffer::from_pixels(pixels, 2, 2).unwrap();
///
/// let mut kmeans = KMeans::new(2);
/// kmeans.fit_buffer(&buffer).unwrap();
///
/// assert_eq!(kmeans.colors().unwrap().nrows(), 2);
/// assert_eq!(kmeans.labels().unwrap().len(), 4);
/// ```
pub struct KMeans {
    /// Model configuration
    config: KMeansConfig,

    /// Results of the last successful fit (None until then)
    fitted: Option<Fitted>,
}

impl KMeans {
    /// Create a new estimator extracting `n_clusters` colors, with default
    /// configuration otherwise.
    ///
    /// # Panics
    ///
    /// Panics if `n_clusters` is 0.
    pub fn new(n_clusters: usize) -> Self {
        assert!(n_clusters > 0, "n_clusters must be greater than 0");

        Self {
            config: KMeansConfig::new(n_clusters),
            fitted: None,
        }
    }

    /// Create a new estimator with a custom configuration.
    ///
    /// # Panics
    ///
    /// Panics if `config.n_clusters` is 0.
    pub fn with_config(config: KMeansConfig) -> Self {
        assert!(config.n_clusters > 0, "n_clusters must be greater than 0");

        Self {
            config,
            fitted: None,
        }
    }

    /// Fit the estimator to a matrix of color vectors, one row per pixel.
    ///
    /// On success the previous colors and labels are fully replaced; on
    /// failure they are left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input has no rows ([`Error::EmptyInput`])
    /// - `n_clusters` exceeds the number of rows ([`Error::InvalidClusterCount`])
    pub fn fit(&mut self, data: &ArrayView2<f32>) -> Result<&mut Self, Error> {
        let LloydResult {
            centroids,
            labels,
            inertia,
            n_iterations,
        } = lloyd(data, &self.config)?;

        // Centroid means are kept on the integer grid by the update step, so
        // narrowing to u8 is lossless.
        let colors = centroids.mapv(|v| v as u8);

        self.fitted = Some(Fitted {
            colors,
            labels,
            inertia,
            n_iterations,
        });
        Ok(self)
    }

    /// Fit the estimator to the pixels of an image buffer.
    ///
    /// Equivalent to `fit(&buffer.to_matrix().view())`.
    pub fn fit_buffer(&mut self, buffer: &PixelBuffer) -> Result<&mut Self, Error> {
        self.fit(&buffer.to_matrix().view())
    }

    /// The cluster center colors of the last successful fit, one row per
    /// cluster.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFitted`] before the first successful fit.
    pub fn colors(&self) -> Result<ArrayView2<u8>, Error> {
        let fitted = self.fitted.as_ref().ok_or(Error::NotFitted)?;
        Ok(fitted.colors.view())
    }

    /// The per-pixel cluster labels of the last successful fit, each in
    /// `[0, n_clusters)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFitted`] before the first successful fit.
    pub fn labels(&self) -> Result<ArrayView1<i64>, Error> {
        let fitted = self.fitted.as_ref().ok_or(Error::NotFitted)?;
        Ok(fitted.labels.view())
    }

    /// Final inertia of the last successful fit: the sum of squared distances
    /// of every vector to its assigned cluster center.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFitted`] before the first successful fit.
    pub fn inertia(&self) -> Result<f64, Error> {
        let fitted = self.fitted.as_ref().ok_or(Error::NotFitted)?;
        Ok(fitted.inertia)
    }

    /// Number of Lloyd iterations the last successful fit ran.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFitted`] before the first successful fit.
    pub fn n_iterations(&self) -> Result<usize, Error> {
        let fitted = self.fitted.as_ref().ok_or(Error::NotFitted)?;
        Ok(fitted.n_iterations)
    }

    /// Get the number of clusters
    pub fn n_clusters(&self) -> usize {
        self.config.n_clusters
    }

    /// Get the configuration
    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }
}

impl Default for KMeans {
    fn default() -> Self {
        Self::with_config(KMeansConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    fn sample_buffer() -> PixelBuffer {
        let pixels = vec![
            [255u8, 0, 0],
            [250, 5, 5],
            [248, 2, 8],
            [0, 0, 255],
            [5, 5, 250],
            [2, 8, 248],
        ];
        PixelBuffer::from_pixels(pixels, 3, 2).unwrap()
    }

    #[test]
    fn test_kmeans_new() {
        let kmeans = KMeans::new(5);
        assert_eq!(kmeans.n_clusters(), 5);
        assert!(matches!(kmeans.colors(), Err(Error::NotFitted)));
        assert!(matches!(kmeans.labels(), Err(Error::NotFitted)));
        assert!(matches!(kmeans.inertia(), Err(Error::NotFitted)));
        assert!(matches!(kmeans.n_iterations(), Err(Error::NotFitted)));
    }

    #[test]
    fn test_kmeans_default() {
        let kmeans = KMeans::default();
        assert_eq!(kmeans.n_clusters(), 10);
        assert_eq!(kmeans.config().max_iters, 300);
        assert_eq!(kmeans.config().tol, 1e-4);
        assert_eq!(kmeans.config().seed, 0);
    }

    #[test]
    #[should_panic(expected = "n_clusters must be greater than 0")]
    fn test_kmeans_zero_clusters() {
        let _ = KMeans::new(0);
    }

    #[test]
    fn test_kmeans_fit_buffer() {
        let buffer = sample_buffer();
        let mut kmeans = KMeans::new(2);

        kmeans.fit_buffer(&buffer).unwrap();

        let colors = kmeans.colors().unwrap();
        assert_eq!(colors.nrows(), 2);
        assert_eq!(colors.ncols(), 3);

        let labels = kmeans.labels().unwrap();
        assert_eq!(labels.len(), 6);
        for &label in labels.iter() {
            assert!((0..2).contains(&label));
        }

        assert!(kmeans.inertia().unwrap() >= 0.0);
        assert!(kmeans.n_iterations().unwrap() >= 1);
    }

    #[test]
    fn test_kmeans_refit_replaces_state() {
        let buffer = sample_buffer();
        let mut kmeans = KMeans::with_config(KMeansConfig::new(2).with_seed(1));

        kmeans.fit_buffer(&buffer).unwrap();
        let first_labels = kmeans.labels().unwrap().to_owned();

        let single = PixelBuffer::from_pixels(vec![[10u8, 20, 30], [10, 20, 30]], 2, 1).unwrap();
        kmeans.fit_buffer(&single).unwrap();

        let labels = kmeans.labels().unwrap();
        assert_eq!(labels.len(), 2);
        assert_ne!(labels.len(), first_labels.len());
    }

    #[test]
    fn test_kmeans_failed_fit_preserves_state() {
        let buffer = sample_buffer();
        let mut kmeans = KMeans::new(2);

        kmeans.fit_buffer(&buffer).unwrap();
        let colors_before = kmeans.colors().unwrap().to_owned();
        let labels_before = kmeans.labels().unwrap().to_owned();

        // Empty input must fail without touching the previous results
        let empty = Array2::<f32>::zeros((0, 3));
        assert!(matches!(
            kmeans.fit(&empty.view()),
            Err(Error::EmptyInput)
        ));

        assert_eq!(kmeans.colors().unwrap(), colors_before.view());
        assert_eq!(kmeans.labels().unwrap(), labels_before.view());
    }

    #[test]
    fn test_kmeans_too_many_clusters() {
        let buffer = sample_buffer();
        let mut kmeans = KMeans::new(7);

        let result = kmeans.fit_buffer(&buffer);
        assert!(matches!(result, Err(Error::InvalidClusterCount(_))));
        assert!(matches!(kmeans.colors(), Err(Error::NotFitted)));
    }

    #[test]
    fn test_kmeans_single_pixel() {
        let buffer = PixelBuffer::from_pixels(vec![[12u8, 34, 56]], 1, 1).unwrap();
        let mut kmeans = KMeans::new(1);

        kmeans.fit_buffer(&buffer).unwrap();

        assert_eq!(kmeans.colors().unwrap(), array![[12u8, 34, 56]].view());
        assert_eq!(kmeans.labels().unwrap(), array![0i64].view());
        assert_eq!(kmeans.inertia().unwrap(), 0.0);
    }
}
