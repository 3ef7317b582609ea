//! Core pixel buffer type shared by sessions and image windows.

use thiserror::Error;

/// Errors raised when building a snapshot from raw pixel data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    /// A snapshot needs at least one pixel.
    #[error("Snapshot is {width}x{height}; both sides must be at least 1 pixel")]
    InvalidDimensions { width: u32, height: u32 },

    /// The RGB buffer does not cover the snapshot exactly.
    #[error("Snapshot buffer holds {actual} bytes but {expected} are needed for RGB pixels")]
    InvalidPixelData { expected: usize, actual: usize },
}

/// An immutable RGB pixel buffer.
///
/// Used both for full-screen captures and for the bitmaps shown in floating
/// image windows. Once constructed the pixels are never mutated; derived
/// variants (crops, greyscale) are new snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    width: u32,
    height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    pixels: Vec<u8>,
}

impl Snapshot {
    /// Create a snapshot, validating that the buffer matches the dimensions.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, SnapshotError> {
        if width == 0 || height == 0 {
            return Err(SnapshotError::InvalidDimensions { width, height });
        }

        let expected = (width as usize) * (height as usize) * 3;
        if pixels.len() != expected {
            return Err(SnapshotError::InvalidPixelData {
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build from a buffer whose size the caller has already established.
    pub(crate) fn from_parts(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width as usize) * (height as usize) * 3,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a snapshot from an `image::RgbImage`.
    pub fn from_rgb_image(img: image::RgbImage) -> Result<Self, SnapshotError> {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.into_raw())
    }

    /// Convert to an `image::RgbImage` for encoding or clipboard export.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGB bytes, row-major.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Read the RGB value at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + x as usize) * 3;
        Some([self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]])
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }
}
