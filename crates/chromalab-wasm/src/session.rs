//! Stateful editor session for a browser shell.
//!
//! `JsSession` wraps the core [`Session`]: the page feeds it raw bytes from a
//! file input or frames from a `<video>` element, forwards the text of its
//! input fields, and draws whatever `display_rgba()` returns.
//!
//! Errors are thrown as strings of the form `"<title>: <message>"`, where the
//! title is one of `Error`, `Input Error` or `Camera Error`.

use chromalab_core::capture::{Frame, PixelLayout};
use chromalab_core::decode::ColorImage;
use chromalab_core::params::ParamError;
use chromalab_core::{Action, Session, SessionConfig, SessionError};
use wasm_bindgen::prelude::*;

use crate::types::JsColorImage;

/// One editor window's worth of state.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const session = new JsSession({ display_max_edge: 640 });
/// session.load_bytes(new Uint8Array(await file.arrayBuffer()));
/// try {
///   session.apply_red_mask(thresholdInput.value);
/// } catch (e) {
///   alert(e);
/// }
/// const view = session.display_fitted();
/// ctx.putImageData(new ImageData(new Uint8ClampedArray(view.rgba()), view.width), 0, 0);
/// ```
#[wasm_bindgen]
pub struct JsSession {
    inner: Session,
}

#[wasm_bindgen]
impl JsSession {
    /// Create a session. `config` may be `undefined` or a partial settings
    /// object; missing keys take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsSession, JsValue> {
        let config = parse_config(config)?;
        Ok(Self::with_config(config))
    }

    /// Current settings as a plain object.
    pub fn config(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.config())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Replace the settings. Loaded images are kept.
    pub fn set_config(&mut self, config: JsValue) -> Result<(), JsValue> {
        let config = parse_config(config)?;
        self.inner.set_config(config);
        Ok(())
    }

    /// Decode PNG or JPEG bytes and show them.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        self.inner.load_bytes(bytes).map(drop).map_err(session_error)
    }

    /// Install a raw frame. `bgr` selects BGR byte order instead of RGB.
    pub fn load_frame(
        &mut self,
        width: u32,
        height: u32,
        pixels: Vec<u8>,
        bgr: bool,
    ) -> Result<(), JsValue> {
        let layout = if bgr { PixelLayout::Bgr } else { PixelLayout::Rgb };
        self.install(Frame {
            width,
            height,
            layout,
            data: pixels,
        })
    }

    /// Install a frame grabbed from a canvas (`ImageData.data`).
    pub fn load_rgba(&mut self, width: u32, height: u32, rgba: &[u8]) -> Result<(), JsValue> {
        self.install(Frame {
            width,
            height,
            layout: PixelLayout::Rgba,
            data: rgba.to_vec(),
        })
    }

    /// Show one channel of the source (`"red"`, `"g"`, ...).
    pub fn select_channel(&mut self, text: &str) -> Result<(), JsValue> {
        self.inner.select_channel(text).map(drop).map_err(session_error)
    }

    /// Show the red mask for the threshold text.
    pub fn apply_red_mask(&mut self, text: &str) -> Result<(), JsValue> {
        self.inner.apply_red_mask(text).map(drop).map_err(session_error)
    }

    pub fn sharpen(&mut self) -> Result<(), JsValue> {
        self.inner.sharpen().map(drop).map_err(session_error)
    }

    /// Show the source with a rectangle from the four coordinate fields.
    pub fn draw_rectangle(&mut self, x1: &str, y1: &str, x2: &str, y2: &str) -> Result<(), JsValue> {
        self.inner
            .draw_rectangle([x1, y1, x2, y2])
            .map(drop)
            .map_err(session_error)
    }

    /// Apply an action object such as `{ kind: "red_mask", threshold: 128 }`.
    pub fn apply_action(&mut self, action: JsValue) -> Result<(), JsValue> {
        let action: Action = serde_wasm_bindgen::from_value(action).map_err(|e| {
            let err = SessionError::from(ParamError::MalformedAction(e.to_string()));
            log::warn!("apply_action rejected: {err}");
            session_error(err)
        })?;
        self.inner.apply(action).map(drop).map_err(session_error)
    }

    #[wasm_bindgen(getter)]
    pub fn has_image(&self) -> bool {
        self.inner.has_image()
    }

    #[wasm_bindgen(getter)]
    pub fn display_width(&self) -> Option<u32> {
        self.inner.display().map(ColorImage::width)
    }

    #[wasm_bindgen(getter)]
    pub fn display_height(&self) -> Option<u32> {
        self.inner.display().map(ColorImage::height)
    }

    /// Full-resolution display image as RGBA, or `undefined` before a load.
    pub fn display_rgba(&self) -> Option<Vec<u8>> {
        self.inner.display_rgba()
    }

    /// Copy of the full-resolution display image.
    pub fn display_image(&self) -> Option<JsColorImage> {
        self.inner.display().cloned().map(JsColorImage::from_core)
    }

    /// Copy of the unmodified source image.
    pub fn source_image(&self) -> Option<JsColorImage> {
        self.inner.source().cloned().map(JsColorImage::from_core)
    }

    /// Display image scaled down to `display_max_edge`.
    pub fn display_fitted(&self) -> Result<Option<JsColorImage>, JsValue> {
        self.inner
            .fitted_display()
            .map(|image| image.map(JsColorImage::from_core))
            .map_err(session_error)
    }
}

impl JsSession {
    pub(crate) fn with_config(config: SessionConfig) -> Self {
        Self {
            inner: Session::with_config(config),
        }
    }

    fn install(&mut self, frame: Frame) -> Result<(), JsValue> {
        self.inner.load_frame(frame).map(drop).map_err(session_error)
    }
}

fn parse_config(value: JsValue) -> Result<SessionConfig, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(SessionConfig::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Format a session error the way the shell presents it.
pub(crate) fn error_text(err: &SessionError) -> String {
    format!("{}: {}", err.title(), err)
}

fn session_error(err: SessionError) -> JsValue {
    JsValue::from_str(&error_text(&err))
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_new_with_undefined_config() {
        let s = JsSession::new(JsValue::UNDEFINED).unwrap();
        assert!(!s.has_image());
    }

    #[wasm_bindgen_test]
    fn test_action_before_load_throws() {
        let mut s = JsSession::new(JsValue::NULL).unwrap();
        let err = s.apply_red_mask("abc").unwrap_err();
        assert_eq!(err.as_string().as_deref(), Some("Error: Load an image first"));
    }

    #[wasm_bindgen_test]
    fn test_partial_config_object() {
        let config = js_sys::Object::new();
        js_sys::Reflect::set(&config, &"display_max_edge".into(), &JsValue::from(2)).unwrap();
        let mut s = JsSession::new(config.into()).unwrap();
        s.load_frame(4, 2, vec![0u8; 24], false).unwrap();

        let fitted = s.display_fitted().unwrap().unwrap();
        assert_eq!((fitted.width(), fitted.height()), (2, 1));
    }

    #[wasm_bindgen_test]
    fn test_apply_action_object() {
        let mut s = JsSession::new(JsValue::UNDEFINED).unwrap();
        s.load_frame(1, 1, vec![200, 0, 0], false).unwrap();
        let action = serde_wasm_bindgen::to_value(&Action::RedMask {
            threshold: 100.into(),
        })
        .unwrap();
        s.apply_action(action).unwrap();
        assert_eq!(s.display_rgba().unwrap(), vec![255, 255, 255, 255]);
    }

    #[wasm_bindgen_test]
    fn test_bad_frames_throw_titled_errors() {
        let mut s = JsSession::new(JsValue::UNDEFINED).unwrap();
        s.load_frame(1, 1, vec![10, 20, 30], false).unwrap();

        let short = s.load_frame(2, 2, vec![0u8; 5], true).unwrap_err();
        assert!(short.as_string().unwrap().starts_with("Error: "));

        // 65536 * 65536 * 3 wraps a 32-bit usize to 0
        let huge = s.load_frame(65_536, 65_536, Vec::new(), false).unwrap_err();
        assert!(huge.as_string().unwrap().contains("too large"));

        let rgba = s.load_rgba(65_536, 65_536, &[]).unwrap_err();
        assert!(rgba.as_string().unwrap().starts_with("Error: "));

        assert_eq!(s.display_rgba().unwrap(), vec![10, 20, 30, 255]);
    }

    #[wasm_bindgen_test]
    fn test_malformed_action_object() {
        let mut s = JsSession::new(JsValue::UNDEFINED).unwrap();
        s.load_frame(1, 1, vec![10, 20, 30], false).unwrap();

        let action = js_sys::Object::new();
        js_sys::Reflect::set(&action, &"kind".into(), &"blur".into()).unwrap();
        let err = s.apply_action(action.into()).unwrap_err();

        assert!(err.as_string().unwrap().starts_with("Input Error: "));
        assert_eq!(s.display_rgba().unwrap(), vec![10, 20, 30, 255]);
    }

    #[wasm_bindgen_test]
    fn test_invalid_threshold_keeps_display() {
        let mut s = JsSession::new(JsValue::UNDEFINED).unwrap();
        s.load_frame(1, 1, vec![10, 20, 30], false).unwrap();
        let err = s.apply_red_mask("300").unwrap_err();
        assert!(err.as_string().unwrap().starts_with("Input Error: "));
        assert_eq!(s.display_rgba().unwrap(), vec![10, 20, 30, 255]);
    }
}
