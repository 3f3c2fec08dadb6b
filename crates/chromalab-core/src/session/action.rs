//! The fixed set of user actions and their dispatch to transforms.

use crate::decode::ColorImage;
use crate::transform::{draw_rectangle_with, isolate_channel, red_mask, sharpen};
use crate::{Channel, Rect, Threshold};

use super::SessionConfig;

/// A validated request to transform the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    /// Keep one channel, zero the others
    IsolateChannel { channel: Channel },
    /// Black/white mask of red values above the threshold
    RedMask { threshold: Threshold },
    /// 3x3 sharpening
    Sharpen,
    /// Rectangle outline in the configured annotation style
    DrawRectangle { rect: Rect },
}

impl Action {
    /// Run the transform for this action on `source`.
    pub fn apply(&self, source: &ColorImage, config: &SessionConfig) -> ColorImage {
        match *self {
            Action::IsolateChannel { channel } => isolate_channel(source, channel),
            Action::RedMask { threshold } => red_mask(source, threshold),
            Action::Sharpen => sharpen(source),
            Action::DrawRectangle { rect } => draw_rectangle_with(source, rect, &config.annotation),
        }
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Action::IsolateChannel { .. } => "isolate_channel",
            Action::RedMask { .. } => "red_mask",
            Action::Sharpen => "sharpen",
            Action::DrawRectangle { .. } => "draw_rectangle",
        }
    }
}
