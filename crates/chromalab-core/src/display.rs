//! Conversion of result images into what a rendering surface needs.
//!
//! The session always stores full-resolution images. Everything here produces
//! a separate presentation buffer and never touches the stored pixels.

use crate::decode::{buffer_len, ColorImage, DecodeError, FilterType, ImageError};

/// Expand RGB pixels to RGBA with opaque alpha.
///
/// The layout matches a canvas `ImageData` buffer. Color values are copied
/// unchanged.
pub fn to_rgba(image: &ColorImage) -> Vec<u8> {
    let mut out = Vec::with_capacity(image.pixel_count() * 4);
    for chunk in image.pixels().chunks_exact(3) {
        out.extend_from_slice(&[chunk[0], chunk[1], chunk[2], 255]);
    }
    out
}

/// Build an image from RGBA pixels, dropping the alpha channel.
///
/// This is the inverse of [`to_rgba`] for opaque images, used for frames
/// grabbed from a canvas.
pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<ColorImage, ImageError> {
    let expected = buffer_len(width, height, 4)?;
    if rgba.len() != expected {
        return Err(ImageError::BufferSizeMismatch {
            expected,
            actual: rgba.len(),
        });
    }
    let pixels = rgba
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();
    ColorImage::new(width, height, pixels)
}

/// Calculate the largest size that fits `max_width x max_height` while
/// preserving the aspect ratio of `width x height`.
///
/// Upscales small images, as a keep-aspect-ratio label scaling does. Returns
/// `(0, 0)` for an empty source or box; otherwise both edges are at least 1.
pub fn fit_dimensions(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 || max_width == 0 || max_height == 0 {
        return (0, 0);
    }

    let scale = (max_width as f64 / width as f64).min(max_height as f64 / height as f64);
    let new_width = ((width as f64 * scale).round() as u32).clamp(1, max_width);
    let new_height = ((height as f64 * scale).round() as u32).clamp(1, max_height);
    (new_width, new_height)
}

/// Downscale an image so its longest edge is at most `max_edge`.
///
/// Images that already fit are returned as a clone (no upscaling of the
/// presentation buffer).
///
/// # Errors
///
/// Returns `DecodeError::InvalidTargetSize` if `max_edge` is zero.
pub fn fit_to_display(
    image: &ColorImage,
    max_edge: u32,
    filter: FilterType,
) -> Result<ColorImage, DecodeError> {
    if max_edge == 0 {
        return Err(DecodeError::InvalidTargetSize {
            width: 0,
            height: 0,
        });
    }

    let (width, height) = image.dimensions();
    if width <= max_edge && height <= max_edge {
        return Ok(image.clone());
    }

    let (new_width, new_height) = fit_dimensions(width, height, max_edge, max_edge);
    resize(image, new_width, new_height, filter)
}

/// Resize an image to exact dimensions.
pub fn resize(
    image: &ColorImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<ColorImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidTargetSize { width, height });
    }

    if image.dimensions() == (width, height) {
        return Ok(image.clone());
    }

    let rgb_image = image
        .to_rgb_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbImage".to_string()))?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());
    ColorImage::from_rgb_image(resized).map_err(|_| DecodeError::EmptyImage)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> ColorImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8);
                pixels.push(((y * 255) / height.max(1)) as u8);
                pixels.push(128);
            }
        }
        ColorImage::new(width, height, pixels).unwrap()
    }

    #[test]
    fn test_to_rgba_is_lossless() {
        let img = ColorImage::new(2, 1, vec![1, 2, 3, 250, 251, 252]).unwrap();
        assert_eq!(to_rgba(&img), vec![1, 2, 3, 255, 250, 251, 252, 255]);
    }

    #[test]
    fn test_from_rgba_drops_alpha() {
        let img = from_rgba(2, 1, &[1, 2, 3, 0, 4, 5, 6, 128]).unwrap();
        assert_eq!(img.pixels(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(from_rgba(2, 1, &to_rgba(&img)).unwrap(), img);
    }

    #[test]
    fn test_from_rgba_wrong_length() {
        assert_eq!(
            from_rgba(2, 2, &[0u8; 12]),
            Err(ImageError::BufferSizeMismatch {
                expected: 16,
                actual: 12
            })
        );
    }

    #[test]
    fn test_from_rgba_oversized_is_error() {
        assert_eq!(
            from_rgba(u32::MAX, u32::MAX, &[]),
            Err(ImageError::TooLarge {
                width: u32::MAX,
                height: u32::MAX
            })
        );
    }

    #[test]
    fn test_fit_dimensions_landscape() {
        assert_eq!(fit_dimensions(6000, 4000, 600, 400), (600, 400));
        assert_eq!(fit_dimensions(6000, 3000, 600, 400), (600, 300));
    }

    #[test]
    fn test_fit_dimensions_portrait() {
        assert_eq!(fit_dimensions(4000, 6000, 600, 400), (267, 400));
    }

    #[test]
    fn test_fit_dimensions_upscales() {
        assert_eq!(fit_dimensions(100, 50, 600, 400), (600, 300));
    }

    #[test]
    fn test_fit_dimensions_extreme_aspect_never_zero() {
        assert_eq!(fit_dimensions(10_000, 1, 100, 100), (100, 1));
    }

    #[test]
    fn test_fit_dimensions_zero_input() {
        assert_eq!(fit_dimensions(0, 0, 256, 256), (0, 0));
        assert_eq!(fit_dimensions(10, 10, 0, 256), (0, 0));
    }

    #[test]
    fn test_fit_to_display_landscape() {
        let img = gradient(600, 400);
        let fitted = fit_to_display(&img, 300, FilterType::Bilinear).unwrap();
        assert_eq!(fitted.dimensions(), (300, 200));
    }

    #[test]
    fn test_fit_to_display_keeps_small_images() {
        let img = gradient(100, 50);
        let fitted = fit_to_display(&img, 256, FilterType::Bilinear).unwrap();
        assert_eq!(fitted, img);
    }

    #[test]
    fn test_fit_to_display_zero_edge_error() {
        let img = gradient(10, 10);
        assert!(fit_to_display(&img, 0, FilterType::Nearest).is_err());
    }

    #[test]
    fn test_resize_zero_dimensions_error() {
        let img = gradient(100, 50);
        assert!(resize(&img, 0, 50, FilterType::Bilinear).is_err());
        assert!(resize(&img, 50, 0, FilterType::Bilinear).is_err());
    }

    #[test]
    fn test_resize_all_filters() {
        let img = gradient(100, 50);
        for filter in [
            FilterType::Nearest,
            FilterType::Bilinear,
            FilterType::Lanczos3,
        ] {
            let resized = resize(&img, 50, 25, filter).unwrap();
            assert_eq!(resized.dimensions(), (50, 25));
            assert_eq!(resized.pixels().len(), 50 * 25 * 3);
        }
    }
}
