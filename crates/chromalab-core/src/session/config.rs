//! Session settings.
//!
//! All fields have defaults and the struct deserializes with
//! `#[serde(default)]`, so a shell only has to send the keys it overrides.

use serde::{Deserialize, Serialize};

use crate::decode::FilterType;
use crate::AnnotationStyle;

/// Settings that shape how a [`Session`](super::Session) acquires and presents images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Stroke used by the rectangle action
    pub annotation: AnnotationStyle,
    /// Longest edge of the fitted display buffer, 0 to disable fitting
    pub display_max_edge: u32,
    /// Filter used when fitting the display buffer
    pub display_filter: FilterType,
    /// Rotate/flip loaded files according to their EXIF orientation
    pub apply_exif_orientation: bool,
}

impl SessionConfig {
    pub const DEFAULT_DISPLAY_MAX_EDGE: u32 = 800;
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            annotation: AnnotationStyle::default(),
            display_max_edge: Self::DEFAULT_DISPLAY_MAX_EDGE,
            display_filter: FilterType::Bilinear,
            apply_exif_orientation: true,
        }
    }
}
