//! Stateless transform bindings.
//!
//! Each function reads a [`JsColorImage`] and returns a new one. The input
//! is never modified, so a shell can keep one source image and derive any
//! number of views from it.

use chromalab_core::params::{self, ParamError};
use chromalab_core::transform;
use chromalab_core::{Channel, Rect, Threshold};
use wasm_bindgen::prelude::*;

use crate::to_js_error;
use crate::types::JsColorImage;

/// Keep one channel and zero the other two.
///
/// `channel` accepts `"red"`, `"green"`, `"blue"` or their first letter, in
/// any case.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const greenOnly = isolate_channel(source, "green");
/// ```
#[wasm_bindgen]
pub fn isolate_channel(image: &JsColorImage, channel: &str) -> Result<JsColorImage, JsValue> {
    let channel: Channel = params::parse_channel(channel).map_err(to_js_error)?;
    Ok(JsColorImage::from_core(transform::isolate_channel(
        image.as_core(),
        channel,
    )))
}

/// White where red is strictly above `threshold`, black elsewhere.
///
/// Throws unless `threshold` is a whole number in 0-255.
#[wasm_bindgen]
pub fn red_mask(image: &JsColorImage, threshold: f64) -> Result<JsColorImage, JsValue> {
    let threshold = threshold_from_number(threshold).map_err(to_js_error)?;
    Ok(JsColorImage::from_core(transform::red_mask(
        image.as_core(),
        threshold,
    )))
}

/// Apply the 3x3 sharpening kernel.
#[wasm_bindgen]
pub fn sharpen(image: &JsColorImage) -> JsColorImage {
    JsColorImage::from_core(transform::sharpen(image.as_core()))
}

/// Draw a 2 px blue rectangle outline between two corners.
///
/// Corners may be given in any order and may lie outside the image; the
/// outline is clipped to the image bounds. Throws if a coordinate is not a
/// whole number.
#[wasm_bindgen]
pub fn draw_rectangle(
    image: &JsColorImage,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
) -> Result<JsColorImage, JsValue> {
    let rect = rect_from_numbers([x1, y1, x2, y2]).map_err(to_js_error)?;
    Ok(JsColorImage::from_core(transform::draw_rectangle(
        image.as_core(),
        rect,
    )))
}

/// Parse threshold text the way the mask handler does.
///
/// Returns the value, or throws with a message naming the problem
/// (empty, not a number, out of 0-255).
#[wasm_bindgen]
pub fn validate_threshold(text: &str) -> Result<u8, JsValue> {
    params::parse_threshold(text)
        .map(Threshold::value)
        .map_err(to_js_error)
}

/// Largest integer a JS number represents exactly.
const MAX_SAFE_INTEGER: i64 = (1 << 53) - 1;

fn threshold_from_number(value: f64) -> Result<Threshold, ParamError> {
    const FIELD: &str = "threshold";
    let value = whole_number(FIELD, value)?;
    u8::try_from(value)
        .map(Threshold::new)
        .map_err(|_| ParamError::OutOfRange {
            field: FIELD,
            value,
            min: u8::MIN as i64,
            max: u8::MAX as i64,
        })
}

fn rect_from_numbers(values: [f64; 4]) -> Result<Rect, ParamError> {
    let mut coords = [0i64; 4];
    for ((coord, value), field) in coords.iter_mut().zip(values).zip(params::RECT_FIELDS) {
        *coord = whole_number(field, value)?;
    }
    let [x1, y1, x2, y2] = coords;
    Ok(Rect::new(x1, y1, x2, y2))
}

/// Accept a JS number only if it is an integer that converts exactly.
fn whole_number(field: &'static str, value: f64) -> Result<i64, ParamError> {
    if !value.is_finite() || value.fract() != 0.0 || value.abs() > MAX_SAFE_INTEGER as f64 {
        return Err(ParamError::NotANumber {
            field,
            value: value.to_string(),
        });
    }
    Ok(value as i64)
}
