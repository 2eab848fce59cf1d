//! Browser adapter.
//!
//! Binds the browser-free core to a real `<canvas>`: [`surface::CanvasSurface`]
//! implements [`crate::surface::Surface`] over `CanvasRenderingContext2d`,
//! [`fetch::HtmlImageFetcher`] decodes covers through `HtmlImageElement`, and
//! [`host::GridHost`] owns the cell state, the resize listener, and the
//! animation-frame redraw loop.

pub mod fetch;
pub mod host;
pub mod surface;

pub use host::{GridHost, HostError};

use wasm_bindgen::JsValue;

/// Route `log` records to the browser console and install the panic hook.
///
/// Calling it again keeps the first logger.
pub fn init_logging(level: log::Level) {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(level).is_err() {
        log::debug!("console logger already installed");
    }
}

/// Best-effort text for a thrown JS value.
pub(crate) fn js_message(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}
