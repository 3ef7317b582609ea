//! Interactive screen-region selection.
//!
//! The selector is a small state machine driven by pointer and key events:
//!
//! ```text
//! Idle ──press──▶ CreatingRegion ──release──▶ Idle (region, or none if zero-area)
//! Idle+region ──press on handle──▶ Resizing(handle) ──release──▶ Idle+region
//! Idle+region ──press inside────▶ MovingRegion     ──release──▶ Idle+region
//! ```
//!
//! Hover polling decides what the next press does. While resizing, dragging
//! an edge past its opposite swaps the pair and re-targets the handle to its
//! mirror, so the handle always follows the corner under the pointer.

mod handle;
mod overlay;
mod region;

pub use handle::{Cursor, Handle, DEFAULT_HANDLE_SIZE};
pub use overlay::{OverlayFrame, ACCENT_COLOR, SHADE_ALPHA};
pub use region::{CropRegion, DragPhase, PendingAction, RegionSelector, SelectionOutcome};
