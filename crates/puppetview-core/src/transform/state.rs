//! Per-window transform settings.

use serde::{Deserialize, Serialize};

/// Grid used by proportional (snapped) scaling.
pub const SCALE_STEP: f64 = 0.25;

/// Grid used by snapped rotation, in degrees.
pub const ROTATION_STEP_DEG: i32 = 45;

/// The user-controlled transform of one floating image window.
///
/// Fields are only changed through [`TransformEngine`](super::TransformEngine)
/// operations, which keep them inside their ranges:
/// - `scale` in `[min bound, max_scale]`
/// - `rotation_deg` in `[0, 360)`
/// - `opacity` in `[min_opacity, 1.0]`
///
/// `collapsed` never touches `scale` or `opacity`; the collapsed look is
/// derived at render time, so expanding again restores them exactly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageTransform {
    pub(crate) scale: f64,
    pub(crate) rotation_deg: i32,
    pub(crate) flip_horizontal: bool,
    pub(crate) flip_vertical: bool,
    pub(crate) opacity: f32,
    pub(crate) collapsed: bool,
}

impl Default for ImageTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            rotation_deg: 0,
            flip_horizontal: false,
            flip_vertical: false,
            opacity: 1.0,
            collapsed: false,
        }
    }
}

impl ImageTransform {
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn rotation_deg(&self) -> i32 {
        self.rotation_deg
    }

    pub fn flip_horizontal(&self) -> bool {
        self.flip_horizontal
    }

    pub fn flip_vertical(&self) -> bool {
        self.flip_vertical
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn collapsed(&self) -> bool {
        self.collapsed
    }

    /// True when nothing differs from the identity transform.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Wrap any angle in degrees into `[0, 360)`.
#[inline]
pub fn wrap_degrees(deg: i32) -> i32 {
    deg.rem_euclid(360)
}

/// Rotation mirrored for a flip: `(360 - deg) mod 360`.
#[inline]
pub fn mirrored_rotation(deg: i32) -> i32 {
    (360 - wrap_degrees(deg)) % 360
}
