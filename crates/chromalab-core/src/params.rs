//! Validation of user-entered transform parameters.
//!
//! The shell hands over raw text from its input fields. Each parser trims
//! surrounding whitespace and either returns a typed parameter or a
//! [`ParamError`] naming the offending field. Transforms only ever see
//! values that passed these checks.

use thiserror::Error;

use crate::{Channel, Rect, Threshold};

/// Field names used in rectangle errors, in input order.
pub const RECT_FIELDS: [&str; 4] = ["x1", "y1", "x2", "y2"];

/// Rejected user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    /// The field was left empty.
    #[error("{field} is required")]
    Missing { field: &'static str },

    /// The field is not an integer.
    #[error("{field} must be a whole number, got {value:?}")]
    NotANumber { field: &'static str, value: String },

    /// The field is an integer outside the accepted range.
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// The channel selector names no known channel.
    #[error("Unknown channel {0:?} (expected red, green or blue)")]
    UnknownChannel(String),

    /// A structured action request could not be read.
    #[error("Malformed action: {0}")]
    MalformedAction(String),
}

/// Parse a threshold in the range 0-255.
pub fn parse_threshold(text: &str) -> Result<Threshold, ParamError> {
    const FIELD: &str = "threshold";
    let value = parse_integer(FIELD, text)?;
    u8::try_from(value)
        .map(Threshold::new)
        .map_err(|_| ParamError::OutOfRange {
            field: FIELD,
            value,
            min: u8::MIN as i64,
            max: u8::MAX as i64,
        })
}

/// Parse the four rectangle fields `x1, y1, x2, y2`.
///
/// Any integer is accepted; bounds are handled by clipping when drawing.
/// The first invalid field is reported.
pub fn parse_rect(fields: [&str; 4]) -> Result<Rect, ParamError> {
    let mut coords = [0i64; 4];
    for ((coord, text), name) in coords.iter_mut().zip(fields).zip(RECT_FIELDS) {
        *coord = parse_integer(name, text)?;
    }
    let [x1, y1, x2, y2] = coords;
    Ok(Rect::new(x1, y1, x2, y2))
}

/// Parse a channel name such as `"Red"` or `"g"`.
pub fn parse_channel(text: &str) -> Result<Channel, ParamError> {
    text.parse()
}

fn parse_integer(field: &'static str, text: &str) -> Result<i64, ParamError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParamError::Missing { field });
    }
    trimmed.parse::<i64>().map_err(|_| ParamError::NotANumber {
        field,
        value: trimmed.to_string(),
    })
}
