//! PuppetView WASM - WebAssembly bindings for PuppetView
//!
//! This crate exposes the puppetview-core engines to a web page that draws
//! the overlays and reference windows itself.
//!
//! # Module Structure
//!
//! - `types` - `JsSnapshot`, the pixel buffer crossing the boundary
//! - `session` - crop and color probe sessions
//! - `window` - floating image windows
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsSnapshot, JsColorProbe, format_color } from '@puppetview/wasm';
//!
//! await init();
//!
//! const snapshot = new JsSnapshot(width, height, rgbBytes);
//! const probe = new JsColorProbe(snapshot, { colorFormat: 'css' }, (text) => copy(text));
//! console.log(format_color(255, 10, 0, 'hex')); // 0xff0a00
//! ```

use puppetview_core::color::ColorFormat;
use wasm_bindgen::prelude::*;

mod input;
mod logging;
mod session;
mod types;
mod window;

// Re-export public types
pub use session::{JsColorProbe, JsCropSession};
pub use types::JsSnapshot;
pub use window::JsImageWindow;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logging::install(log::LevelFilter::Info);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Format an RGB color as `html`, `hex`, `css` or `rgb` text.
#[wasm_bindgen]
pub fn format_color(r: u8, g: u8, b: u8, format: &str) -> Result<String, JsValue> {
    let format = format
        .parse::<ColorFormat>()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(format.format([r, g, b]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_format_color() {
        assert_eq!(format_color(255, 10, 0, "html").ok().as_deref(), Some("#ff0a00"));
        assert_eq!(format_color(255, 10, 0, "CSS").ok().as_deref(), Some("rgb(255, 10, 0)"));
    }
}

/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_format_color_unknown_format() {
        assert!(format_color(0, 0, 0, "cmyk").is_err());
    }
}
