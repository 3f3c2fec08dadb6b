//! Still capture from a camera device.
//!
//! Device drivers live outside this crate and plug in through
//! [`CameraDevice`]. [`capture_still`] owns the open/read/release sequence:
//! the device is released exactly once before it returns, whatever the
//! outcome.

use thiserror::Error;

use crate::decode::{ColorImage, ImageError};
use crate::display;

/// Errors raised while grabbing a frame.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The device could not be opened.
    #[error("Camera not available: {0}")]
    Unavailable(String),

    /// The device was opened but reading a frame failed.
    #[error("Failed to read frame: {0}")]
    ReadFailed(String),

    /// The device returned no frame.
    #[error("Camera returned no frame")]
    EmptyFrame,

    /// The frame does not describe a valid image.
    #[error("Invalid frame: {0}")]
    InvalidFrame(#[from] ImageError),
}

/// Byte order of the channels in a [`Frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelLayout {
    Rgb,
    #[default]
    Bgr,
    /// 4 bytes per pixel, alpha ignored (canvas `ImageData`)
    Rgba,
}

/// A raw frame as delivered by a device.
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub layout: PixelLayout,
    /// Packed pixels in `layout` order, row-major
    pub data: Vec<u8>,
}

impl Frame {
    /// Convert to a [`ColorImage`], reordering channels if needed.
    pub fn into_image(self) -> Result<ColorImage, ImageError> {
        match self.layout {
            PixelLayout::Rgb => ColorImage::new(self.width, self.height, self.data),
            PixelLayout::Bgr => ColorImage::from_bgr(self.width, self.height, self.data),
            PixelLayout::Rgba => display::from_rgba(self.width, self.height, &self.data),
        }
    }
}

/// A blocking camera device.
pub trait CameraDevice {
    /// Acquire the device.
    fn open(&mut self) -> Result<(), CaptureError>;

    /// Block until one frame is available. `Ok(None)` means the device
    /// produced nothing.
    fn read_frame(&mut self) -> Result<Option<Frame>, CaptureError>;

    /// Release the device. Must tolerate being called after a failed `open`.
    fn release(&mut self);
}

/// Releases the wrapped device when dropped.
struct DeviceGuard<'a, D: CameraDevice + ?Sized> {
    device: &'a mut D,
}

impl<D: CameraDevice + ?Sized> Drop for DeviceGuard<'_, D> {
    fn drop(&mut self) {
        self.device.release();
        log::debug!("camera released");
    }
}

/// Open `device`, read a single frame and release the device.
pub fn capture_still<D: CameraDevice + ?Sized>(device: &mut D) -> Result<ColorImage, CaptureError> {
    let mut guard = DeviceGuard { device };
    guard.device.open()?;

    let frame = guard
        .device
        .read_frame()?
        .ok_or(CaptureError::EmptyFrame)?;
    log::debug!("captured {}x{} frame", frame.width, frame.height);

    Ok(frame.into_image()?)
}
