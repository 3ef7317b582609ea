//! WASM-compatible wrapper for pixel buffers.

use puppetview_core::snapshot::{extract_region, to_greyscale, CropRect, Snapshot};
use wasm_bindgen::prelude::*;

/// An RGB pixel buffer for JavaScript.
///
/// Wraps the core `Snapshot`. Screen captures, crop results and image
/// window bitmaps all cross the boundary as this type.
///
/// # Memory Management
///
/// The pixel data lives in WASM memory. `pixels()` copies it into a
/// `Uint8Array`; `free()` may be called to release a large buffer early.
#[wasm_bindgen]
pub struct JsSnapshot {
    inner: Snapshot,
}

#[wasm_bindgen]
impl JsSnapshot {
    /// Create a snapshot from RGB data (3 bytes per pixel, row-major).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsSnapshot, JsValue> {
        let inner =
            Snapshot::new(width, height, pixels).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.byte_size()
    }

    /// Returns RGB pixel data as Uint8Array (a copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels().to_vec()
    }

    /// `[r, g, b]` at `(x, y)`, or `undefined` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Vec<u8>> {
        self.inner.pixel(x, y).map(|px| px.to_vec())
    }

    /// Greyscale copy.
    pub fn greyscale(&self) -> JsSnapshot {
        Self::from_snapshot(to_greyscale(&self.inner))
    }

    /// Sub-buffer, clamped to the snapshot. `undefined` when empty.
    pub fn crop(&self, x: u32, y: u32, width: u32, height: u32) -> Option<JsSnapshot> {
        extract_region(&self.inner, CropRect::new(x, y, width, height)).map(Self::from_snapshot)
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsSnapshot {
    pub(crate) fn from_snapshot(inner: Snapshot) -> Self {
        Self { inner }
    }

    pub(crate) fn as_snapshot(&self) -> &Snapshot {
        &self.inner
    }
}
