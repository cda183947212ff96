use crate::error::Error;
use image::DynamicImage;
use ndarray::Array2;
use std::path::Path;

/// Channel counts a buffer may hold: grayscale, RGB, or RGBA
const SUPPORTED_CHANNELS: [usize; 3] = [1, 3, 4];

/// Owned, decoded pixel data for a single image.
///
/// A `PixelBuffer` stores its samples as one flat `Vec<u8>` in row-major
/// order, with `samples.len() == width * height * channels` guaranteed for
/// every constructed buffer. It is the input side of the clustering pipeline:
/// the estimator consumes it only through [`pixels`](PixelBuffer::pixels) or
/// [`to_matrix`](PixelBuffer::to_matrix), a sequence of fixed-length color
/// vectors, and never needs to know about rows, columns, or decoding.
///
/// # Example
///
/// ```
/// use dominant_colors::PixelBuffer;
///
/// let pixels = vec![[255u8, 0, 0], [0, 255, 0], [0, 0, 255], [0, 0, 0]];
/// let buffer = PixelBuffer::from_pixels(pixels, 2, 2).unwrap();
///
/// assert_eq!(buffer.shape(), (2, 2, 3));
/// assert_eq!(buffer.pixel(0).unwrap(), &[255, 0, 0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: usize,
    samples: Vec<u8>,
}

impl PixelBuffer {
    /// Decode an image file into a pixel buffer.
    ///
    /// The channel count is taken from the decoded format: 8-bit grayscale
    /// maps to 1 channel, RGB to 3, RGBA (and grayscale with alpha) to 4.
    /// Any other format is converted to 8-bit RGB.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the file is missing, corrupt, or in an
    /// unsupported format.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let img = image::open(path)?;
        Ok(Self::from_dynamic(img))
    }

    /// Decode an in-memory encoded image (PNG, JPEG, ...) into a pixel buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the bytes are not a decodable image.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let img = image::load_from_memory(bytes)?;
        Ok(Self::from_dynamic(img))
    }

    /// Build a pixel buffer from `[row][col][channel]` nested vectors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Shape`] if the input is empty, rows have different
    /// lengths, pixels have different channel counts, or the channel count is
    /// not 1, 3, or 4.
    pub fn from_nested(rows: &[Vec<Vec<u8>>]) -> Result<Self, Error> {
        if rows.is_empty() || rows[0].is_empty() {
            return Err(Error::Shape("nested pixel data is empty".to_string()));
        }

        let height = rows.len();
        let width = rows[0].len();
        let channels = rows[0][0].len();

        if !SUPPORTED_CHANNELS.contains(&channels) {
            return Err(Error::Shape(format!(
                "unsupported channel count {} (expected 1, 3, or 4)",
                channels
            )));
        }

        let mut samples = Vec::with_capacity(width * height * channels);
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(Error::Shape(format!(
                    "row {} has {} pixels, expected {}",
                    y,
                    row.len(),
                    width
                )));
            }
            for (x, pixel) in row.iter().enumerate() {
                if pixel.len() != channels {
                    return Err(Error::Shape(format!(
                        "pixel ({}, {}) has {} channels, expected {}",
                        x,
                        y,
                        pixel.len(),
                        channels
                    )));
                }
                samples.extend_from_slice(pixel);
            }
        }

        Ok(Self {
            width: width as u32,
            height: height as u32,
            channels,
            samples,
        })
    }

    /// Build a pixel buffer from a flat row-major sequence of pixel tuples.
    ///
    /// The channel count is inferred from the tuple arity `N`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Shape`] if `pixels.len() != width * height`, either
    /// dimension is zero, or `N` is not 1, 3, or 4.
    pub fn from_pixels<const N: usize>(
        pixels: Vec<[u8; N]>,
        width: u32,
        height: u32,
    ) -> Result<Self, Error> {
        if !SUPPORTED_CHANNELS.contains(&N) {
            return Err(Error::Shape(format!(
                "unsupported channel count {} (expected 1, 3, or 4)",
                N
            )));
        }

        if width == 0 || height == 0 {
            return Err(Error::Shape(format!(
                "image dimensions ({}, {}) must be non-zero",
                width, height
            )));
        }

        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(Error::Shape(format!(
                "{} pixels do not fill a {}x{} image (expected {})",
                pixels.len(),
                width,
                height,
                expected
            )));
        }

        let samples = pixels.iter().flatten().copied().collect();
        Ok(Self {
            width,
            height,
            channels: N,
            samples,
        })
    }

    fn from_dynamic(img: DynamicImage) -> Self {
        let (width, height, channels, samples) = match img {
            DynamicImage::ImageLuma8(buf) => {
                let (w, h) = buf.dimensions();
                (w, h, 1, buf.into_raw())
            }
            DynamicImage::ImageRgb8(buf) => {
                let (w, h) = buf.dimensions();
                (w, h, 3, buf.into_raw())
            }
            DynamicImage::ImageRgba8(buf) => {
                let (w, h) = buf.dimensions();
                (w, h, 4, buf.into_raw())
            }
            gray_alpha @ DynamicImage::ImageLumaA8(_) => {
                let buf = gray_alpha.to_rgba8();
                let (w, h) = buf.dimensions();
                (w, h, 4, buf.into_raw())
            }
            // 16-bit and float formats narrow to 8-bit RGB
            other => {
                let buf = other.to_rgb8();
                let (w, h) = buf.dimensions();
                (w, h, 3, buf.into_raw())
            }
        };

        Self {
            width,
            height,
            channels,
            samples,
        }
    }

    /// Width of the image in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the image in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of channels per pixel (1, 3, or 4)
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Number of pixels (`width * height`)
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Whether the buffer holds zero pixels
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shape of the image as `(height, width, channels)`
    pub fn shape(&self) -> (u32, u32, usize) {
        (self.height, self.width, self.channels)
    }

    /// The raw flat sample buffer in row-major order
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Get the samples of the pixel at a flat row-major index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `index >= len()`.
    pub fn pixel(&self, index: usize) -> Result<&[u8], Error> {
        if index >= self.len() {
            return Err(Error::OutOfBounds(format!(
                "pixel index {} exceeds buffer length {}",
                index,
                self.len()
            )));
        }
        let offset = index * self.channels;
        Ok(&self.samples[offset..offset + self.channels])
    }

    /// Get the samples of the pixel at column `x`, row `y`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `x >= width` or `y >= height`.
    pub fn pixel_at(&self, x: u32, y: u32) -> Result<&[u8], Error> {
        self.check_coords(x, y)?;
        self.pixel(y as usize * self.width as usize + x as usize)
    }

    /// Overwrite the pixel at a flat row-major index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `index >= len()`, or [`Error::Shape`]
    /// if `value.len()` differs from the channel count.
    pub fn set_pixel(&mut self, index: usize, value: &[u8]) -> Result<(), Error> {
        if index >= self.len() {
            return Err(Error::OutOfBounds(format!(
                "pixel index {} exceeds buffer length {}",
                index,
                self.len()
            )));
        }
        if value.len() != self.channels {
            return Err(Error::Shape(format!(
                "pixel value has {} samples, expected {}",
                value.len(),
                self.channels
            )));
        }
        let offset = index * self.channels;
        self.samples[offset..offset + self.channels].copy_from_slice(value);
        Ok(())
    }

    /// Overwrite the pixel at column `x`, row `y`.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`set_pixel`](PixelBuffer::set_pixel).
    pub fn set_pixel_at(&mut self, x: u32, y: u32, value: &[u8]) -> Result<(), Error> {
        self.check_coords(x, y)?;
        self.set_pixel(y as usize * self.width as usize + x as usize, value)
    }

    fn check_coords(&self, x: u32, y: u32) -> Result<(), Error> {
        if x >= self.width || y >= self.height {
            return Err(Error::OutOfBounds(format!(
                "pixel ({}, {}) is outside a {}x{} image",
                x, y, self.width, self.height
            )));
        }
        Ok(())
    }

    /// Iterate over the pixels in row-major order.
    ///
    /// Each item is one pixel's samples, a slice of length `channels`. The
    /// iterator is cheap and restartable; this is the vector-sequence view
    /// the clustering estimator consumes.
    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.samples.chunks_exact(self.channels)
    }

    /// Copy the buffer into an `(n_pixels, channels)` float matrix, the input
    /// format of [`KMeans::fit`](crate::KMeans::fit).
    pub fn to_matrix(&self) -> Array2<f32> {
        let values: Vec<f32> = self.samples.iter().map(|&s| f32::from(s)).collect();
        Array2::from_shape_vec((self.len(), self.channels), values)
            .expect("sample count matches width * height * channels")
    }

    /// Export the buffer as `[row][col][channel]` nested vectors, the inverse
    /// of [`from_nested`](PixelBuffer::from_nested).
    pub fn to_nested(&self) -> Vec<Vec<Vec<u8>>> {
        let width = self.width as usize;
        self.pixels()
            .map(<[u8]>::to_vec)
            .collect::<Vec<_>>()
            .chunks(width)
            .map(<[Vec<u8>]>::to_vec)
            .collect()
    }
}
