//! Image acquisition from encoded files.
//!
//! This module provides:
//! - Decoding PNG and JPEG bytes into a [`ColorImage`]
//! - Loading images from disk with the same extension filter as the shell's file picker
//! - EXIF orientation correction on load
//!
//! Camera frames enter through [`crate::capture`] instead.
//!
//! # Examples
//!
//! ```ignore
//! use chromalab_core::decode::load_image;
//!
//! let image = load_image("photo.jpg")?;
//! println!("Decoded {}x{} image", image.width(), image.height());
//! ```

mod file;
mod types;

pub use file::{
    decode_image, decode_image_no_orientation, has_supported_extension,
    load_image, read_image_file, SUPPORTED_EXTENSIONS,
};
pub use types::{ColorImage, DecodeError, FilterType, ImageError};
pub(crate) use types::{buffer_len, Orientation};
