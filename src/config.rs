/// Configuration for the KMeans estimator
#[derive(Debug, Clone)]
pub struct KMeansConfig {
    /// Number of clusters (dominant colors) to extract
    pub n_clusters: usize,

    /// Maximum number of Lloyd iterations
    pub max_iters: usize,

    /// Convergence tolerance. The fit stops early when the relative decrease
    /// in inertia between consecutive iterations falls below this threshold.
    pub tol: f64,

    /// Random seed for centroid initialization and empty-cluster reseeding
    pub seed: u64,

    /// Print verbose output during fitting
    pub verbose: bool,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            n_clusters: 10,
            max_iters: 300,
            tol: 1e-4,
            seed: 0,
            verbose: false,
        }
    }
}

impl KMeansConfig {
    /// Create a new configuration with the specified number of clusters
    pub fn new(n_clusters: usize) -> Self {
        Self {
            n_clusters,
            ..Default::default()
        }
    }

    /// Set the maximum number of iterations
    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Set the convergence tolerance
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set verbose mode
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}
