//! PNG and JPEG decoding with EXIF orientation handling.

use std::io::Cursor;
use std::path::Path;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageFormat};

use super::{ColorImage, DecodeError, Orientation};

/// File extensions accepted by [`load_image`], compared case-insensitively.
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Decode a PNG or JPEG image from bytes, applying EXIF orientation correction.
///
/// # Errors
///
/// Returns `DecodeError::UnsupportedFormat` if the bytes are neither PNG nor JPEG.
/// Returns `DecodeError::CorruptedFile` if the data cannot be decoded.
pub fn decode_image(bytes: &[u8]) -> Result<ColorImage, DecodeError> {
    let format = sniff_format(bytes)?;
    let img = decode_dynamic(bytes, format)?;
    let oriented = apply_orientation(img, extract_orientation(bytes));
    into_color_image(oriented)
}

/// Decode a PNG or JPEG image from bytes without applying EXIF orientation.
pub fn decode_image_no_orientation(bytes: &[u8]) -> Result<ColorImage, DecodeError> {
    let format = sniff_format(bytes)?;
    into_color_image(decode_dynamic(bytes, format)?)
}

/// Read and decode an image file.
///
/// Only `.png`, `.jpg` and `.jpeg` files are accepted, mirroring the file
/// picker filter of the application shell.
pub fn load_image(path: impl AsRef<Path>) -> Result<ColorImage, DecodeError> {
    let bytes = read_image_file(path)?;
    decode_image(&bytes)
}

/// Read the raw bytes of a PNG or JPEG file without decoding them.
///
/// The extension is checked before the file is opened.
pub fn read_image_file(path: impl AsRef<Path>) -> Result<Vec<u8>, DecodeError> {
    let path = path.as_ref();
    if !has_supported_extension(path) {
        return Err(DecodeError::UnsupportedFormat);
    }
    Ok(std::fs::read(path)?)
}

/// Check a path's extension against [`SUPPORTED_EXTENSIONS`].
pub fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

fn sniff_format(bytes: &[u8]) -> Result<ImageFormat, DecodeError> {
    match image::guess_format(bytes) {
        Ok(format @ (ImageFormat::Png | ImageFormat::Jpeg)) => Ok(format),
        _ => Err(DecodeError::UnsupportedFormat),
    }
}

fn decode_dynamic(bytes: &[u8], format: ImageFormat) -> Result<DynamicImage, DecodeError> {
    image::load_from_memory_with_format(bytes, format)
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}

fn into_color_image(img: DynamicImage) -> Result<ColorImage, DecodeError> {
    ColorImage::from_rgb_image(img.into_rgb8()).map_err(|_| DecodeError::EmptyImage)
}

/// Returns `Orientation::Normal` if no EXIF data is found.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    let Ok(exif) = Reader::new().read_from_container(&mut cursor) else {
        return Orientation::Normal;
    };
    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(Orientation::from)
        .unwrap_or_default()
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::jpeg::JpegEncoder;
    use image::codecs::png::PngEncoder;
    use image::{ExtendedColorType, ImageEncoder};

    fn png_bytes(width: u32, height: u32, pixels: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        PngEncoder::new(&mut out)
            .write_image(pixels, width, height, ExtendedColorType::Rgb8)
            .unwrap();
        out
    }

    fn jpeg_bytes(width: u32, height: u32, pixels: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        JpegEncoder::new_with_quality(&mut out, 95)
            .write_image(pixels, width, height, ExtendedColorType::Rgb8)
            .unwrap();
        out
    }

    #[test]
    fn test_decode_png_is_lossless() {
        let pixels = vec![255, 0, 0, 0, 255, 0, 0, 0, 255, 10, 20, 30];
        let img = decode_image(&png_bytes(2, 2, &pixels)).unwrap();

        assert_eq!(img.dimensions(), (2, 2));
        assert_eq!(img.pixels(), &pixels[..]);
    }

    #[test]
    fn test_decode_jpeg() {
        let pixels = vec![128u8; 8 * 8 * 3];
        let img = decode_image(&jpeg_bytes(8, 8, &pixels)).unwrap();

        assert_eq!(img.dimensions(), (8, 8));
        // JPEG is lossy but a flat gray block survives almost exactly
        assert!(img.pixels().iter().all(|&v| v.abs_diff(128) <= 2));
    }

    #[test]
    fn test_decode_no_orientation() {
        let pixels = vec![1, 2, 3, 4, 5, 6];
        let img = decode_image_no_orientation(&png_bytes(2, 1, &pixels)).unwrap();
        assert_eq!(img.dimensions(), (2, 1));
    }

    #[test]
    fn test_decode_unknown_format() {
        let result = decode_image(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::UnsupportedFormat)));
    }

    #[test]
    fn test_decode_gif_rejected() {
        let result = decode_image(b"GIF89a\x01\x00\x01\x00");
        assert!(matches!(result, Err(DecodeError::UnsupportedFormat)));
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(decode_image(&[]).is_err());
    }

    #[test]
    fn test_decode_truncated_png() {
        let bytes = png_bytes(4, 4, &[7u8; 4 * 4 * 3]);
        let result = decode_image(&bytes[..20]);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_orientation_without_exif() {
        let bytes = png_bytes(1, 1, &[0, 0, 0]);
        assert_eq!(extract_orientation(&bytes), Orientation::Normal);
        assert_eq!(extract_orientation(&[0x00, 0x01, 0x02]), Orientation::Normal);
    }

    #[test]
    fn test_apply_orientation_rotate90() {
        let rgb_img = image::RgbImage::from_raw(2, 1, vec![255, 0, 0, 0, 255, 0]).unwrap();
        let result = apply_orientation(DynamicImage::ImageRgb8(rgb_img), Orientation::Rotate90CW);

        assert_eq!(result.into_rgb8().dimensions(), (1, 2));
    }

    #[test]
    fn test_apply_orientation_flip_horizontal() {
        let rgb_img = image::RgbImage::from_raw(2, 1, vec![255, 0, 0, 0, 255, 0]).unwrap();
        let result =
            apply_orientation(DynamicImage::ImageRgb8(rgb_img), Orientation::FlipHorizontal)
                .into_rgb8();

        assert_eq!(result.get_pixel(0, 0).0, [0, 255, 0]);
        assert_eq!(result.get_pixel(1, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_supported_extensions() {
        assert!(has_supported_extension(Path::new("photo.PNG")));
        assert!(has_supported_extension(Path::new("dir/photo.jpeg")));
        assert!(has_supported_extension(Path::new("photo.Jpg")));
        assert!(!has_supported_extension(Path::new("photo.gif")));
        assert!(!has_supported_extension(Path::new("photo")));
    }

    #[test]
    fn test_load_image_rejects_extension_before_reading() {
        // The file does not exist; the extension check must fire first
        let result = load_image("/nonexistent/picture.bmp");
        assert!(matches!(result, Err(DecodeError::UnsupportedFormat)));
    }

    #[test]
    fn test_load_image_missing_file() {
        let result = load_image("/nonexistent/picture.png");
        assert!(matches!(result, Err(DecodeError::Io(_))));
    }

    #[test]
    fn test_load_image_from_disk() {
        let path = std::env::temp_dir().join(format!(
            "chromalab-load-{}.png",
            std::process::id()
        ));
        std::fs::write(&path, png_bytes(1, 1, &[9, 8, 7])).unwrap();

        let img = load_image(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(img.pixel(0, 0), Some([9, 8, 7]));
    }
}
