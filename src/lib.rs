//! # dominant-colors
//!
//! Dominant color extraction from images via k-means clustering,
//! compatible with ndarray.
//!
//! ## Features
//!
//! - **Four ways to build a pixel buffer**: decode a file or in-memory bytes
//!   with the `image` codec, or supply pixels directly as nested rows or a
//!   flat row-major sequence
//! - **Deterministic clustering**: centroid initialization is seeded, so a
//!   fixed seed and input always reproduce the same palette and labels
//! - **Parallel assignment**: the per-pixel nearest-centroid pass uses rayon
//! - **scikit-learn style API**: `fit()`, then read `colors()` and `labels()`
//!
//! ## Example
//!
//! ```rust
//! use dominant_colors::{KMeans, PixelBuffer};
//!
//! // A 2x2 image with two tones
//! let pixels = vec![[255u8, 0, 0], [250, 5, 5], [0, 0, 255], [5, 5, 250]];
//! let buffer = PixelBuffer::from_pixels(pixels, 2, 2).unwrap();
//!
//! // Extract the two dominant colors
//! let mut kmeans = KMeans::new(2);
//! kmeans.fit_buffer(&buffer).unwrap();
//!
//! let colors = kmeans.colors().unwrap();
//! let labels = kmeans.labels().unwrap();
//! assert_eq!(colors.nrows(), 2);
//! assert_eq!(labels.len(), 4);
//! ```
//!
//! ## Custom Configuration
//!
//! ```rust
//! use dominant_colors::{KMeans, KMeansConfig, PixelBuffer};
//!
//! let pixels = vec![[0u8, 0, 0], [255, 255, 255], [10, 10, 10], [245, 245, 245]];
//! let buffer = PixelBuffer::from_pixels(pixels, 2, 2).unwrap();
//!
//! let config = KMeansConfig {
//!     n_clusters: 2,
//!     max_iters: 100,
//!     tol: 1e-6,
//!     seed: 42,
//!     verbose: false,
//! };
//!
//! let mut kmeans = KMeans::with_config(config);
//! kmeans.fit_buffer(&buffer).unwrap();
//! ```

mod algorithm;
mod config;
mod distance;
mod error;
mod kmeans;
mod pixels;

pub use config::KMeansConfig;
pub use error::Error;
pub use kmeans::KMeans;
pub use pixels::PixelBuffer;
