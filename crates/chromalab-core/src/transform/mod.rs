//! Pixel transforms applied by the editor.
//!
//! Every function here takes the source image by reference and returns a
//! newly allocated image of the same size. None of them keep state between
//! calls, so the session can apply any of them to the untouched source.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, x grows right, y grows down
//! - Rectangle corners are inclusive pixel coordinates

mod channel;
mod rectangle;
mod sharpen;
mod threshold;

pub use channel::isolate_channel;
pub use rectangle::{draw_rectangle, draw_rectangle_with};
pub use sharpen::{convolve3x3, sharpen, Kernel3x3, SHARPEN_KERNEL};
pub use threshold::{channel_mask, red_mask, MASK_ON};
