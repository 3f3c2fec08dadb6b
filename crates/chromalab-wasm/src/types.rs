//! WASM-compatible wrapper for image data.
//!
//! Pixels cross the boundary as plain byte arrays. Validation happens on the
//! way in, so every `JsColorImage` holds a buffer that matches its size.

use chromalab_core::decode::ColorImage;
use chromalab_core::display;
use wasm_bindgen::prelude::*;

use crate::to_js_error;

/// An RGB image owned by WASM memory.
///
/// # Memory Management
///
/// `pixels()` and `rgba()` copy into JavaScript memory. Keep the image on
/// the WASM side while chaining transforms and only extract pixels to draw.
#[wasm_bindgen]
pub struct JsColorImage {
    inner: ColorImage,
}

#[wasm_bindgen]
impl JsColorImage {
    /// Create an image from RGB pixel data (3 bytes per pixel, row-major).
    ///
    /// Throws if the buffer length does not match `width * height * 3` or an
    /// edge is zero.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsColorImage, JsValue> {
        ColorImage::new(width, height, pixels)
            .map(Self::from_core)
            .map_err(to_js_error)
    }

    /// Create an image from BGR pixel data, as produced by native capture code.
    pub fn from_bgr(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsColorImage, JsValue> {
        ColorImage::from_bgr(width, height, pixels)
            .map(Self::from_core)
            .map_err(to_js_error)
    }

    /// Create an image from canvas `ImageData` bytes. Alpha is dropped.
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<JsColorImage, JsValue> {
        display::from_rgba(width, height, rgba)
            .map(Self::from_core)
            .map_err(to_js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Number of bytes in the RGB buffer
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels().len()
    }

    /// RGB pixel data as `Uint8Array` (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels().to_vec()
    }

    /// Pixel data in BGR order (copied).
    pub fn bgr(&self) -> Vec<u8> {
        self.inner.to_bgr()
    }

    /// RGBA pixel data with opaque alpha, ready for `new ImageData(...)`.
    pub fn rgba(&self) -> Vec<u8> {
        display::to_rgba(&self.inner)
    }
}

impl JsColorImage {
    pub(crate) fn from_core(inner: ColorImage) -> Self {
        Self { inner }
    }

    pub(crate) fn as_core(&self) -> &ColorImage {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid_buffer() {
        let Ok(img) = JsColorImage::new(3, 2, vec![0u8; 18]) else {
            panic!("valid buffer rejected");
        };
        assert_eq!(img.width(), 3);
        assert_eq!(img.height(), 2);
        assert_eq!(img.byte_length(), 18);
    }

    #[test]
    fn test_bgr_round_trip() {
        let Ok(img) = JsColorImage::from_bgr(1, 1, vec![10, 20, 30]) else {
            panic!("valid buffer rejected");
        };
        assert_eq!(img.pixels(), vec![30, 20, 10]);
        assert_eq!(img.bgr(), vec![10, 20, 30]);
    }

    #[test]
    fn test_rgba_views() {
        let Ok(img) = JsColorImage::from_rgba(2, 1, &[1, 2, 3, 9, 4, 5, 6, 9]) else {
            panic!("valid buffer rejected");
        };
        assert_eq!(img.pixels(), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(img.rgba(), vec![1, 2, 3, 255, 4, 5, 6, 255]);
    }

    #[test]
    fn test_from_core_shares_pixels() {
        let core = ColorImage::filled(4, 4, [7, 8, 9]).unwrap();
        let img = JsColorImage::from_core(core.clone());
        assert_eq!(img.as_core(), &core);
    }
}
