//! Window transform engine.
//!
//! Turns scale, rotation, flip, opacity and collapse settings of a floating
//! image into a window shape:
//!
//! - [`ImageTransform`] holds the user-controlled settings
//! - [`TransformEngine`] applies deltas and keeps them in range
//! - [`RenderGeometry`] is the derived window size, clip shape and center
//!
//! Keeping the visual center fixed on screen is the window's job; see
//! [`ImageWindow`](crate::window::ImageWindow).

mod engine;
mod render;
mod state;

pub use engine::TransformEngine;
pub use render::{compute_geometry, RenderGeometry};
pub use state::{mirrored_rotation, wrap_degrees, ImageTransform, ROTATION_STEP_DEG, SCALE_STEP};
