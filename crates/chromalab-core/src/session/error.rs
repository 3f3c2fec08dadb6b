//! Errors reported by session handlers.

use thiserror::Error;

use crate::capture::CaptureError;
use crate::decode::DecodeError;
use crate::params::ParamError;

/// Why an image could not be loaded or captured.
#[derive(Debug, Error)]
pub enum AcquisitionError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Capture(#[from] CaptureError),
}

/// A rejected user action.
///
/// Every variant is terminal for the action that produced it: the session
/// state is left exactly as it was before the call.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Loading a file or grabbing a camera frame failed.
    #[error("Failed to acquire image: {0}")]
    Acquisition(#[from] AcquisitionError),

    /// A transform was requested before any image was acquired.
    #[error("Load an image first")]
    MissingImage,

    /// User input failed validation.
    #[error("Invalid input: {0}")]
    InvalidParameter(#[from] ParamError),

    /// The display buffer could not be prepared.
    #[error("Failed to prepare display: {0}")]
    Display(#[source] DecodeError),
}

impl SessionError {
    /// Short dialog title for the error, as shown by the shell.
    pub fn title(&self) -> &'static str {
        match self {
            SessionError::Acquisition(AcquisitionError::Capture(CaptureError::Unavailable(_))) => {
                "Camera Error"
            }
            SessionError::InvalidParameter(_) => "Input Error",
            _ => "Error",
        }
    }
}
