//! Single-channel isolation.

use crate::decode::ColorImage;
use crate::Channel;

/// Keep one color channel and zero the other two.
///
/// The result is still a three-channel image of the same size, so it
/// displays as a red, green or blue tinted picture rather than grayscale.
pub fn isolate_channel(image: &ColorImage, channel: Channel) -> ColorImage {
    let keep = channel.index();
    let mut output = image.clone();
    for chunk in output.pixels_mut().chunks_exact_mut(3) {
        for (c, value) in chunk.iter_mut().enumerate() {
            if c != keep {
                *value = 0;
            }
        }
    }
    output
}
