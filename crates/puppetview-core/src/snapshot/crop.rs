//! Sub-rectangle extraction.
//!
//! Crops are expressed in whole pixels relative to the snapshot's top-left
//! corner, which is what the region selector commits.

use super::Snapshot;
use serde::{Deserialize, Serialize};

/// A committed crop rectangle in snapshot pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Copy the pixels inside `rect` into a new snapshot.
///
/// The rectangle is clamped to the snapshot bounds first. Returns `None`
/// when nothing of it remains, so a degenerate crop never produces an
/// image.
pub fn extract_region(image: &Snapshot, rect: CropRect) -> Option<Snapshot> {
    let left = rect.x.min(image.width());
    let top = rect.y.min(image.height());
    let right = rect.x.saturating_add(rect.width).min(image.width());
    let bottom = rect.y.saturating_add(rect.height).min(image.height());

    let out_width = right.saturating_sub(left);
    let out_height = bottom.saturating_sub(top);
    if out_width == 0 || out_height == 0 {
        return None;
    }

    // Fast path: full extent returns a clone
    if out_width == image.width() && out_height == image.height() {
        return Some(image.clone());
    }

    let src = image.pixels();
    let src_stride = image.width() as usize * 3;
    let row_len = out_width as usize * 3;
    let mut output = Vec::with_capacity(row_len * out_height as usize);

    // Copy pixel data row by row for efficiency
    for y in top..bottom {
        let start = y as usize * src_stride + left as usize * 3;
        output.extend_from_slice(&src[start..start + row_len]);
    }

    Some(Snapshot::from_parts(out_width, out_height, output))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
