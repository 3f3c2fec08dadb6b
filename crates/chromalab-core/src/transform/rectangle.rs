//! Rectangle outline annotation.
//!
//! Corners may be given in any order and may lie outside the image. The
//! outline is clipped to the image; a rectangle that misses the image
//! entirely leaves the copy unchanged.

use crate::decode::ColorImage;
use crate::{AnnotationStyle, Rect};

/// Draw an outline with the default style (blue, 2 px).
pub fn draw_rectangle(image: &ColorImage, rect: Rect) -> ColorImage {
    draw_rectangle_with(image, rect, &AnnotationStyle::default())
}

/// Draw an unfilled rectangle on a copy of `image`.
///
/// The stroke lies inside the rectangle: every pixel within `thickness`
/// pixels of an edge, with both corners included. Rectangles narrower than
/// twice the thickness come out filled. A thickness of 0 draws nothing.
pub fn draw_rectangle_with(image: &ColorImage, rect: Rect, style: &AnnotationStyle) -> ColorImage {
    let mut output = image.clone();
    if style.thickness == 0 {
        return output;
    }

    let r = rect.normalized();
    let t = style.thickness as i64;
    let (width, height) = output.dimensions();
    let (max_x, max_y) = (width as i64 - 1, height as i64 - 1);

    let y_start = r.y1.max(0);
    let y_end = r.y2.min(max_y);
    if y_start > y_end || r.x1.max(0) > r.x2.min(max_x) {
        return output;
    }

    let mut fill_span = |y: i64, xa: i64, xb: i64| {
        let (xa, xb) = (xa.max(r.x1).max(0), xb.min(r.x2).min(max_x));
        if xa > xb {
            return;
        }
        let row = y as usize * width as usize;
        let pixels = output.pixels_mut();
        for x in xa..=xb {
            let idx = (row + x as usize) * 3;
            pixels[idx..idx + 3].copy_from_slice(&style.color);
        }
    };

    for y in y_start..=y_end {
        // saturating keeps huge coordinates from overflowing the band limits
        let in_horizontal_band = y < r.y1.saturating_add(t) || y > r.y2.saturating_sub(t);
        if in_horizontal_band {
            fill_span(y, r.x1, r.x2);
        } else {
            fill_span(y, r.x1, r.x1.saturating_add(t - 1));
            fill_span(y, r.x2.saturating_sub(t - 1), r.x2);
        }
    }

    output
}
