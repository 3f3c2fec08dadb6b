//! Core types for image acquisition.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error raised when a pixel buffer does not describe a valid image.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    /// Pixel buffer length doesn't match the stated dimensions.
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// The image has no pixels.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    EmptyImage { width: u32, height: u32 },

    /// The buffer size for the stated dimensions does not fit in memory.
    #[error("Image too large: {width}x{height} exceeds the addressable buffer size")]
    TooLarge { width: u32, height: u32 },
}

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file is neither PNG nor JPEG.
    #[error("Unsupported image format (expected PNG or JPEG)")]
    UnsupportedFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The decoded image has no pixels.
    #[error("Decoded image is empty")]
    EmptyImage,

    /// I/O error during file reading.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A resize target was zero-sized.
    #[error("Invalid target size: {width}x{height}")]
    InvalidTargetSize { width: u32, height: u32 },
}

/// Filter type for display resizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Orientation {
    #[default]
    Normal = 1,
    FlipHorizontal = 2,
    Rotate180 = 3,
    FlipVertical = 4,
    /// Flip horizontal + rotate 270 CW.
    Transpose = 5,
    Rotate90CW = 6,
    /// Flip horizontal + rotate 90 CW.
    Transverse = 7,
    Rotate270CW = 8,
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// An 8-bit, three-channel color image.
///
/// Pixels are stored row-major in R, G, B order, 3 bytes per pixel. The
/// buffer length always equals `width * height * 3`: the only public
/// constructors check it, and every transform allocates a buffer of the
/// same size as its input.
///
/// Use [`ColorImage::from_bgr`] and [`ColorImage::to_bgr`] at boundaries
/// that speak B, G, R (most camera drivers and OpenCV-style pipelines).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl ColorImage {
    /// Create an image from RGB pixel data, validating the buffer length.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::EmptyImage { width, height });
        }
        let expected = buffer_len(width, height, 3)?;
        if pixels.len() != expected {
            return Err(ImageError::BufferSizeMismatch {
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

    /// Create an image where every pixel has the same RGB value.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Result<Self, ImageError> {
        let pixels = rgb
            .iter()
            .copied()
            .cycle()
            .take(buffer_len(width, height, 3)?)
            .collect();
        Self::new(width, height, pixels)
    }

    /// Create an image from B, G, R ordered pixel data.
    pub fn from_bgr(width: u32, height: u32, mut pixels: Vec<u8>) -> Result<Self, ImageError> {
        swap_red_blue(&mut pixels);
        Self::new(width, height, pixels)
    }

    /// Create a ColorImage from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Result<Self, ImageError> {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.into_raw())
    }

    /// Convert to an image::RgbImage for further processing.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Copy the pixels out in B, G, R order.
    pub fn to_bgr(&self) -> Vec<u8> {
        let mut out = self.pixels.clone();
        swap_red_blue(&mut out);
        out
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// RGB pixel data in row-major order.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Mutable access to the pixel data. The length cannot change through a slice.
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Consume the image, returning its RGB pixel buffer.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// RGB value of the pixel at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        Some([self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]])
    }
}

/// Byte length of a `width x height` buffer with `channels` bytes per pixel.
///
/// Fails instead of wrapping when the product does not fit in `usize`
/// (32 bits on wasm32).
pub(crate) fn buffer_len(width: u32, height: u32, channels: usize) -> Result<usize, ImageError> {
    usize::try_from(width)
        .ok()
        .zip(usize::try_from(height).ok())
        .and_then(|(w, h)| w.checked_mul(h))
        .and_then(|n| n.checked_mul(channels))
        .ok_or(ImageError::TooLarge { width, height })
}

fn swap_red_blue(pixels: &mut [u8]) {
    for chunk in pixels.chunks_exact_mut(3) {
        chunk.swap(0, 2);
    }
}
