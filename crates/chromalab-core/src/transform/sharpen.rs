//! 3x3 convolution and the sharpening filter built on it.
//!
//! # Border Policy
//!
//! Pixels outside the image are taken from the mirror image around the edge
//! pixel, without repeating it (reflect-101: `dcb|abcd|cba`). A dimension of
//! a single pixel reflects onto itself.

use crate::decode::ColorImage;

/// A 3x3 integer kernel, indexed `[row][column]`.
pub type Kernel3x3 = [[i32; 3]; 3];

/// Sharpening kernel. The weights sum to 1, so flat regions are unchanged
/// and edges are amplified.
pub const SHARPEN_KERNEL: Kernel3x3 = [[-1, -1, -1], [-1, 9, -1], [-1, -1, -1]];

/// Sharpen an image with [`SHARPEN_KERNEL`].
pub fn sharpen(image: &ColorImage) -> ColorImage {
    convolve3x3(image, &SHARPEN_KERNEL)
}

/// Convolve each channel independently with a 3x3 kernel.
///
/// Sums are computed in `i64`, which holds any 3x3 kernel of `i32`
/// weights over 8-bit samples, and saturated to `[0, 255]`.
pub fn convolve3x3(image: &ColorImage, kernel: &Kernel3x3) -> ColorImage {
    let (width, height) = image.dimensions();
    let (w, h) = (width as i64, height as i64);
    let src = image.pixels();
    let mut output = image.clone();
    let dst = output.pixels_mut();

    for y in 0..h {
        let rows = [reflect_101(y - 1, h), y as usize, reflect_101(y + 1, h)];
        for x in 0..w {
            let cols = [reflect_101(x - 1, w), x as usize, reflect_101(x + 1, w)];
            let dst_idx = (y as usize * width as usize + x as usize) * 3;

            let mut sums = [0i64; 3];
            for (ky, &sy) in rows.iter().enumerate() {
                let row_start = sy * width as usize;
                for (kx, &sx) in cols.iter().enumerate() {
                    let weight = i64::from(kernel[ky][kx]);
                    if weight == 0 {
                        continue;
                    }
                    let src_idx = (row_start + sx) * 3;
                    for (c, sum) in sums.iter_mut().enumerate() {
                        *sum += weight * i64::from(src[src_idx + c]);
                    }
                }
            }

            for (c, sum) in sums.iter().enumerate() {
                dst[dst_idx + c] = (*sum).clamp(0, 255) as u8;
            }
        }
    }

    output
}

/// Map a coordinate that may sit one pixel outside `0..n` back inside.
#[inline]
fn reflect_101(i: i64, n: i64) -> usize {
    if n == 1 {
        return 0;
    }
    let i = if i < 0 { -i } else { i };
    let i = if i >= n { 2 * (n - 1) - i } else { i };
    i as usize
}
