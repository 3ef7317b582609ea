//! Render geometry of a transformed image.
//!
//! # Algorithm
//!
//! The scaled image rectangle `(w * s, h * s)` has one corner on the origin.
//! Its four corners are rotated about that origin:
//!
//! ```text
//! v1 = (0, 0)
//! v2 = rotate(w*s, 0)
//! v3 = rotate(w*s, h*s)
//! v4 = rotate(0, h*s)
//! ```
//!
//! The axis-aligned bounding box of `v1..v4` becomes the window size, and
//! its top-left corner is the translation applied before drawing. The clip
//! polygon is the rotated rectangle expressed relative to that corner, so
//! everything outside the image is cut away from the window. The visual
//! center is the midpoint of the diagonal `v1`-`v3`.

use super::state::ImageTransform;
use crate::geometry::{bounding_box, inset_polygon, rotate_point, translate_quad, Point, Quad};
use crate::settings::WindowSettings;
use serde::Serialize;

/// Everything a host needs to size, shape and paint an image window.
///
/// Derived from an [`ImageTransform`]; never edited directly.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderGeometry {
    /// Window width (AABB of the rotated image).
    pub width: i32,
    /// Window height (AABB of the rotated image).
    pub height: i32,
    /// Top-left corner of the AABB in rotated space. Drawing translates by
    /// the negation of this before rotating.
    pub translate: Point,
    /// Window shape in window-local coordinates.
    pub clip: Quad,
    /// Outline polygon, one unit inside `clip`.
    pub border: Quad,
    /// Visual center of the image in window-local coordinates.
    pub center: (f64, f64),
    /// Scale actually used for drawing (smaller while collapsed).
    pub effective_scale: f64,
    /// Opacity actually used for the window.
    pub effective_opacity: f32,
    /// Rotation applied when drawing, degrees clockwise.
    pub rotation_deg: i32,
    /// Destination rectangle for the bitmap in rotated space, as
    /// `(x, y, width, height)`. Flipped axes start at the far edge and have
    /// negative extent.
    pub draw_rect: (i32, i32, i32, i32),
}

/// Compute the render geometry of an `image_width` x `image_height` bitmap
/// under `transform`.
pub fn compute_geometry(
    image_width: u32,
    image_height: u32,
    transform: &ImageTransform,
    limits: &WindowSettings,
) -> RenderGeometry {
    let max_dim = f64::from(image_width.max(image_height).max(1));
    let (effective_scale, effective_opacity) = if transform.collapsed {
        (
            transform
                .scale
                .min(f64::from(limits.collapsed_size_px) / max_dim),
            limits.collapsed_opacity,
        )
    } else {
        (transform.scale, transform.opacity)
    };

    let rad = f64::from(transform.rotation_deg).to_radians();
    let (sin, cos) = (rad.sin(), rad.cos());
    let scaled_w = f64::from(image_width) * effective_scale;
    let scaled_h = f64::from(image_height) * effective_scale;

    // Rect after rotate
    let corners: Quad = [
        Point::new(0, 0),
        rotate_point(scaled_w, 0.0, sin, cos),
        rotate_point(scaled_w, scaled_h, sin, cos),
        rotate_point(0.0, scaled_h, sin, cos),
    ];

    let aabb = bounding_box(&corners);
    let clip = translate_quad(&corners, -aabb.left, -aabb.top);
    let center = (
        f64::from(corners[0].x + corners[2].x) / 2.0 - f64::from(aabb.left),
        f64::from(corners[0].y + corners[2].y) / 2.0 - f64::from(aabb.top),
    );
    let border = inset_polygon(&clip, center);

    let draw_w = scaled_w as i32;
    let draw_h = scaled_h as i32;
    let draw_rect = (
        if transform.flip_horizontal { draw_w } else { 0 },
        if transform.flip_vertical { draw_h } else { 0 },
        if transform.flip_horizontal { -draw_w } else { draw_w },
        if transform.flip_vertical { -draw_h } else { draw_h },
    );

    RenderGeometry {
        width: aabb.width(),
        height: aabb.height(),
        translate: Point::new(aabb.left, aabb.top),
        clip,
        border,
        center,
        effective_scale,
        effective_opacity,
        rotation_deg: transform.rotation_deg,
        draw_rect,
    }
}
