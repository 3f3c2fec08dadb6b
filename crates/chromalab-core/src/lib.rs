//! Chromalab Core - image transforms for a single-image editor
//!
//! This crate provides the pure pixel transforms (channel isolation,
//! threshold masks, sharpening, rectangle annotation) together with the
//! session layer a UI shell drives: image acquisition, parameter
//! validation, action dispatch and display conversion.

pub mod capture;
pub mod decode;
pub mod display;
pub mod params;
pub mod session;
pub mod transform;

use std::fmt;
use std::str::FromStr;

pub use decode::{ColorImage, DecodeError, ImageError};
pub use params::ParamError;
pub use session::{Action, Session, SessionConfig, SessionError};
pub use transform::{draw_rectangle, isolate_channel, red_mask, sharpen};

/// One of the three color channels of a [`ColorImage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// All channels in display order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Byte offset of this channel within an RGB pixel.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
        };
        f.write_str(name)
    }
}

impl FromStr for Channel {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParamError::Missing { field: "channel" });
        }
        match s.to_ascii_lowercase().as_str() {
            "red" | "r" => Ok(Channel::Red),
            "green" | "g" => Ok(Channel::Green),
            "blue" | "b" => Ok(Channel::Blue),
            _ => Err(ParamError::UnknownChannel(s.to_string())),
        }
    }
}

/// Cutoff intensity for a threshold mask.
///
/// Backed by a `u8`, so every value is within 0-255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct Threshold(u8);

impl Threshold {
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

impl From<u8> for Threshold {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

/// Two opposite corners of a rectangle in pixel coordinates.
///
/// Corners may be in any order and anywhere relative to the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    pub y2: i64,
}

impl Rect {
    pub fn new(x1: i64, y1: i64, x2: i64, y2: i64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// The same rectangle with `x1 <= x2` and `y1 <= y2`.
    pub fn normalized(self) -> Self {
        Self {
            x1: self.x1.min(self.x2),
            y1: self.y1.min(self.y2),
            x2: self.x1.max(self.x2),
            y2: self.y1.max(self.y2),
        }
    }
}

/// Stroke used for rectangle annotations.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnnotationStyle {
    /// Stroke color as RGB
    pub color: [u8; 3],
    /// Stroke width in pixels, drawn inside the rectangle
    pub thickness: u32,
}

impl AnnotationStyle {
    /// Pure blue.
    pub const DEFAULT_COLOR: [u8; 3] = [0, 0, 255];
    pub const DEFAULT_THICKNESS: u32 = 2;
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self {
            color: Self::DEFAULT_COLOR,
            thickness: Self::DEFAULT_THICKNESS,
        }
    }
}
