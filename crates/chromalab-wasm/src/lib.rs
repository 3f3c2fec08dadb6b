//! Chromalab WASM - WebAssembly bindings for Chromalab
//!
//! This crate exposes the chromalab-core session and transforms to a browser
//! shell.
//!
//! # Module Structure
//!
//! - `types` - `JsColorImage`, the RGB image handle passed across the boundary
//! - `session` - `JsSession`, the stateful editor (load, act, display)
//! - `transform` - Stateless channel, mask, sharpen and rectangle functions
//! - `logging` - Console backend for the `log` facade
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsSession } from '@chromalab/wasm';
//!
//! await init();
//!
//! const session = new JsSession();
//! session.load_bytes(new Uint8Array(await file.arrayBuffer()));
//! session.select_channel("green");
//! ```

use std::fmt::Display;

use log::LevelFilter;
use wasm_bindgen::prelude::*;

mod logging;
mod session;
mod transform;
mod types;

pub use session::JsSession;
pub use transform::{draw_rectangle, isolate_channel, red_mask, sharpen, validate_threshold};
pub use types::JsColorImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logging::install(LevelFilter::Info);
    log::debug!("chromalab-wasm {} ready", version());
}

/// Change how much the core logs to the console (`"off"` to `"trace"`).
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter = logging::parse_level(level)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown log level {level:?}")))?;
    logging::install(filter);
    Ok(())
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

pub(crate) fn to_js_error(err: impl Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
