use thiserror::Error;

/// Error types for the dominant-colors library
#[derive(Error, Debug)]
pub enum Error {
    /// The image data could not be decoded
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// Manually supplied pixel data does not match the declared dimensions
    #[error("Shape mismatch: {0}")]
    Shape(String),

    /// Pixel access outside the buffer bounds
    #[error("Index out of bounds: {0}")]
    OutOfBounds(String),

    /// The requested number of clusters exceeds the number of input vectors
    #[error("Invalid cluster count: {0}")]
    InvalidClusterCount(String),

    /// There are no vectors to cluster
    #[error("Cannot fit on an empty input")]
    EmptyInput,

    /// Results were read before a successful fit
    #[error("Model has not been fitted. Call fit() first.")]
    NotFitted,
}
