//! Binary masks from a single channel.

use crate::decode::ColorImage;
use crate::{Channel, Threshold};

/// Value written to all three channels of a pixel that passes the threshold.
pub const MASK_ON: u8 = 255;

/// Build a black/white mask from one channel.
///
/// A pixel becomes white (255 in every channel) when the selected channel is
/// strictly greater than `threshold`, black otherwise. The mask is broadcast
/// to three channels so it can be displayed like any other image.
pub fn channel_mask(image: &ColorImage, channel: Channel, threshold: Threshold) -> ColorImage {
    let c = channel.index();
    let t = threshold.value();
    let mut output = image.clone();
    for chunk in output.pixels_mut().chunks_exact_mut(3) {
        let value = if chunk[c] > t { MASK_ON } else { 0 };
        chunk.fill(value);
    }
    output
}

/// Mask of the pixels whose red value exceeds `threshold`.
pub fn red_mask(image: &ColorImage, threshold: Threshold) -> ColorImage {
    channel_mask(image, Channel::Red, threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_image() -> ColorImage {
        // BGR (10, 20, 30): red is 30
        ColorImage::from_bgr(4, 4, [10, 20, 30].repeat(16)).unwrap()
    }

    #[test]
    fn test_red_above_threshold_is_white() {
        let result = red_mask(&scenario_image(), Threshold::new(25));
        assert!(result.pixels().iter().all(|&v| v == 255));
    }

    #[test]
    fn test_red_below_threshold_is_black() {
        let result = red_mask(&scenario_image(), Threshold::new(35));
        assert!(result.pixels().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_equal_to_threshold_is_black() {
        let img = ColorImage::filled(1, 1, [128, 0, 0]).unwrap();
        assert_eq!(red_mask(&img, Threshold::new(128)).pixels(), &[0, 0, 0]);
        assert_eq!(red_mask(&img, Threshold::new(127)).pixels(), &[255, 255, 255]);
    }

    #[test]
    fn test_threshold_extremes() {
        let img = ColorImage::new(2, 1, vec![0, 9, 9, 255, 9, 9]).unwrap();
        assert_eq!(
            red_mask(&img, Threshold::new(0)).pixels(),
            &[0, 0, 0, 255, 255, 255]
        );
        assert!(red_mask(&img, Threshold::new(255))
            .pixels()
            .iter()
            .all(|&v| v == 0));
    }

    #[test]
    fn test_other_channels_ignored() {
        let img = ColorImage::filled(1, 1, [10, 255, 255]).unwrap();
        assert_eq!(red_mask(&img, Threshold::new(100)).pixels(), &[0, 0, 0]);
    }

    #[test]
    fn test_green_channel_mask() {
        let img = ColorImage::new(2, 1, vec![255, 50, 0, 0, 200, 0]).unwrap();
        let result = channel_mask(&img, Channel::Green, Threshold::new(100));
        assert_eq!(result.pixels(), &[0, 0, 0, 255, 255, 255]);
    }
}
