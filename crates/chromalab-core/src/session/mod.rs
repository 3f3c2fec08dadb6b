//! Editing session: the state a UI shell keeps between user actions.
//!
//! A [`Session`] owns the last acquired image (the *source*) and the image
//! currently shown (the *display*). Actions are always computed from the
//! source, never from the display, so applying two actions in a row does not
//! stack their effects.
//!
//! # Handler Order
//!
//! The text-driven handlers ([`Session::apply_red_mask`] and friends) check,
//! in order:
//! 1. An image has been acquired (`SessionError::MissingImage`)
//! 2. The input text is valid (`SessionError::InvalidParameter`)
//!
//! Only then is the transform run and the display replaced. A failed handler
//! leaves both images untouched.

mod action;
mod config;
mod error;

use std::path::Path;

use crate::capture::{capture_still, CameraDevice, CaptureError, Frame};
use crate::decode::{self, ColorImage};
use crate::display;
use crate::params;

pub use action::Action;
pub use config::SessionConfig;
pub use error::{AcquisitionError, SessionError};

/// Owned state of one editor window.
#[derive(Debug, Clone, Default)]
pub struct Session {
    config: SessionConfig,
    source: Option<ColorImage>,
    display: Option<ColorImage>,
}

impl Session {
    /// Create an empty session with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Replace the settings. Images already held are kept as they are.
    pub fn set_config(&mut self, config: SessionConfig) {
        self.config = config;
    }

    /// The last acquired image, unmodified.
    pub fn source(&self) -> Option<&ColorImage> {
        self.source.as_ref()
    }

    /// The image currently on screen.
    pub fn display(&self) -> Option<&ColorImage> {
        self.display.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.source.is_some()
    }

    /// Install an image as both source and display.
    pub fn set_image(&mut self, image: ColorImage) -> &ColorImage {
        log::info!("image acquired: {}x{}", image.width(), image.height());
        self.display = Some(image.clone());
        self.source.insert(image)
    }

    /// Decode PNG or JPEG bytes and make them the current image.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<&ColorImage, SessionError> {
        let decoded = if self.config.apply_exif_orientation {
            decode::decode_image(bytes)
        } else {
            decode::decode_image_no_orientation(bytes)
        };
        let image = decoded
            .map_err(AcquisitionError::from)
            .map_err(|e| rejected("load", e.into()))?;
        Ok(self.set_image(image))
    }

    /// Read a `.png`, `.jpg` or `.jpeg` file and make it the current image.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<&ColorImage, SessionError> {
        let bytes = decode::read_image_file(path)
            .map_err(AcquisitionError::from)
            .map_err(|e| rejected("load", e.into()))?;
        self.load_bytes(&bytes)
    }

    /// Grab one frame from `device` and make it the current image.
    ///
    /// The device is released before this returns, on success or failure.
    pub fn capture<D: CameraDevice + ?Sized>(
        &mut self,
        device: &mut D,
    ) -> Result<&ColorImage, SessionError> {
        let image = capture_still(device)
            .map_err(AcquisitionError::from)
            .map_err(|e| rejected("capture", e.into()))?;
        Ok(self.set_image(image))
    }

    /// Install a frame delivered outside a [`CameraDevice`], such as one
    /// grabbed from a browser video element.
    pub fn load_frame(&mut self, frame: Frame) -> Result<&ColorImage, SessionError> {
        let image = frame
            .into_image()
            .map_err(CaptureError::from)
            .map_err(AcquisitionError::from)
            .map_err(|e| rejected("load_frame", e.into()))?;
        Ok(self.set_image(image))
    }

    /// Apply a validated action to the source and show the result.
    pub fn apply(&mut self, action: Action) -> Result<&ColorImage, SessionError> {
        let source = self.require_image(action.name())?;
        let result = action.apply(source, &self.config);
        log::debug!("applied {} to {}x{} image", action.name(), result.width(), result.height());
        let shown: &ColorImage = self.display.insert(result);
        Ok(shown)
    }

    /// Show only the channel named by `text` ("Red", "green", "b", ...).
    pub fn select_channel(&mut self, text: &str) -> Result<&ColorImage, SessionError> {
        self.require_image("isolate_channel")?;
        let channel = params::parse_channel(text).map_err(|e| rejected("isolate_channel", e.into()))?;
        self.apply(Action::IsolateChannel { channel })
    }

    /// Show the red mask for the threshold typed in `text` (0-255).
    pub fn apply_red_mask(&mut self, text: &str) -> Result<&ColorImage, SessionError> {
        self.require_image("red_mask")?;
        let threshold = params::parse_threshold(text).map_err(|e| rejected("red_mask", e.into()))?;
        self.apply(Action::RedMask { threshold })
    }

    /// Show the sharpened source.
    pub fn sharpen(&mut self) -> Result<&ColorImage, SessionError> {
        self.apply(Action::Sharpen)
    }

    /// Show the source with a rectangle drawn from the four coordinate fields.
    pub fn draw_rectangle(&mut self, fields: [&str; 4]) -> Result<&ColorImage, SessionError> {
        self.require_image("draw_rectangle")?;
        let rect = params::parse_rect(fields).map_err(|e| rejected("draw_rectangle", e.into()))?;
        self.apply(Action::DrawRectangle { rect })
    }

    /// RGBA copy of the display image for a canvas.
    pub fn display_rgba(&self) -> Option<Vec<u8>> {
        self.display.as_ref().map(display::to_rgba)
    }

    /// The display image scaled down to `display_max_edge`.
    ///
    /// Returns `Ok(None)` when nothing is displayed yet.
    pub fn fitted_display(&self) -> Result<Option<ColorImage>, SessionError> {
        let Some(image) = self.display.as_ref() else {
            return Ok(None);
        };
        if self.config.display_max_edge == 0 {
            return Ok(Some(image.clone()));
        }
        display::fit_to_display(image, self.config.display_max_edge, self.config.display_filter)
            .map(Some)
            .map_err(SessionError::Display)
    }

    fn require_image(&self, action: &str) -> Result<&ColorImage, SessionError> {
        self.source
            .as_ref()
            .ok_or_else(|| rejected(action, SessionError::MissingImage))
    }
}

fn rejected(action: &str, err: SessionError) -> SessionError {
    log::warn!("{action} rejected: {err}");
    err
}
