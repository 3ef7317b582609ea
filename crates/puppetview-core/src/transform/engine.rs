//! Transform operations for one image window.

use super::render::{compute_geometry, RenderGeometry};
use super::state::{mirrored_rotation, wrap_degrees, ImageTransform, ROTATION_STEP_DEG, SCALE_STEP};
use crate::settings::WindowSettings;

/// Applies user deltas to an [`ImageTransform`] and recomputes geometry.
///
/// Every operation clamps its result into range and returns the new
/// [`RenderGeometry`]. Out-of-range inputs are never rejected.
#[derive(Debug, Clone)]
pub struct TransformEngine {
    image_width: u32,
    image_height: u32,
    limits: WindowSettings,
    transform: ImageTransform,
}

impl TransformEngine {
    /// Engine for an `image_width` x `image_height` bitmap with the
    /// identity transform. Unusable limits fall back to their defaults.
    pub fn new(image_width: u32, image_height: u32, limits: WindowSettings) -> Self {
        Self {
            image_width,
            image_height,
            limits: limits.sanitized(),
            transform: ImageTransform::default(),
        }
    }

    pub fn transform(&self) -> &ImageTransform {
        &self.transform
    }

    pub fn limits(&self) -> &WindowSettings {
        &self.limits
    }

    /// Geometry of the current transform.
    pub fn geometry(&self) -> RenderGeometry {
        compute_geometry(self.image_width, self.image_height, &self.transform, &self.limits)
    }

    fn max_dimension(&self) -> f64 {
        f64::from(self.image_width.max(self.image_height).max(1))
    }

    /// Smallest scale `set_scale` accepts. Never above 1 so 1:1 stays
    /// reachable for tiny images.
    pub fn min_scale(&self) -> f64 {
        (f64::from(self.limits.min_size_px) / self.max_dimension()).min(1.0)
    }

    // ========================================================================
    // Scale
    // ========================================================================

    /// Set an absolute scale. Non-finite values are ignored.
    pub fn set_scale(&mut self, scale: f64) -> RenderGeometry {
        if scale.is_finite() {
            self.transform.scale = scale.clamp(self.min_scale(), self.limits.max_scale);
        }
        self.geometry()
    }

    /// Grow or shrink the longer image side by `delta_px` screen pixels.
    ///
    /// The new side length is truncated to whole pixels and never drops below
    /// `min_size_px`. Height is used when both sides are equal.
    pub fn adjust_scale_by_pixels(&mut self, delta_px: i32) -> RenderGeometry {
        let dim = if self.image_width > self.image_height {
            self.image_width
        } else {
            self.image_height
        };
        let dim = f64::from(dim.max(1));
        let new_size = (dim * self.transform.scale + f64::from(delta_px))
            .max(f64::from(self.limits.min_size_px))
            .trunc();
        self.transform.scale = (new_size / dim).min(self.limits.max_scale);
        self.geometry()
    }

    /// Snap to the nearest quarter step, then move `steps` quarter steps.
    pub fn adjust_scale_proportional(&mut self, steps: i32) -> RenderGeometry {
        let snapped = (self.transform.scale / SCALE_STEP + f64::from(steps)).round() * SCALE_STEP;
        self.transform.scale = snapped.clamp(SCALE_STEP, self.limits.max_scale);
        self.geometry()
    }

    /// Scale 1:1.
    pub fn actual_size(&mut self) -> RenderGeometry {
        self.set_scale(1.0)
    }

    // ========================================================================
    // Rotation and flips
    // ========================================================================

    /// Free rotation by `delta_deg`, wrapped into `[0, 360)`.
    pub fn rotate(&mut self, delta_deg: i32) -> RenderGeometry {
        self.transform.rotation_deg = wrap_degrees(self.transform.rotation_deg.wrapping_add(delta_deg));
        self.geometry()
    }

    /// Snap to the nearest 45 degree multiple, then move `steps` multiples.
    pub fn rotate_snapped(&mut self, steps: i32) -> RenderGeometry {
        let step = f64::from(ROTATION_STEP_DEG);
        let snapped = (f64::from(self.transform.rotation_deg) / step + f64::from(steps)).round();
        // Steps come from wheel deltas; the i64 detour keeps huge values from overflowing.
        let deg = (snapped as i64 * i64::from(ROTATION_STEP_DEG)).rem_euclid(360);
        self.transform.rotation_deg = deg as i32;
        self.geometry()
    }

    /// Mirror left-right. The rotation is mirrored with it.
    pub fn toggle_flip_horizontal(&mut self) -> RenderGeometry {
        self.transform.flip_horizontal = !self.transform.flip_horizontal;
        self.transform.rotation_deg = mirrored_rotation(self.transform.rotation_deg);
        self.geometry()
    }

    /// Mirror top-bottom. The rotation is mirrored with it.
    pub fn toggle_flip_vertical(&mut self) -> RenderGeometry {
        self.transform.flip_vertical = !self.transform.flip_vertical;
        self.transform.rotation_deg = mirrored_rotation(self.transform.rotation_deg);
        self.geometry()
    }

    pub fn reset_rotation_and_flip(&mut self) -> RenderGeometry {
        self.transform.rotation_deg = 0;
        self.transform.flip_horizontal = false;
        self.transform.flip_vertical = false;
        self.geometry()
    }

    // ========================================================================
    // Opacity and collapse
    // ========================================================================

    /// Change opacity by `delta`, clamped to `[min_opacity, 1.0]`.
    pub fn adjust_opacity(&mut self, delta: f32) -> RenderGeometry {
        let next = self.transform.opacity + delta;
        if next.is_finite() {
            self.transform.opacity = next.clamp(self.limits.min_opacity, 1.0);
        }
        self.geometry()
    }

    pub fn reset_opacity(&mut self) -> RenderGeometry {
        self.transform.opacity = 1.0;
        self.geometry()
    }

    pub fn toggle_collapsed(&mut self) -> RenderGeometry {
        self.set_collapsed(!self.transform.collapsed)
    }

    pub fn set_collapsed(&mut self, collapsed: bool) -> RenderGeometry {
        self.transform.collapsed = collapsed;
        self.geometry()
    }

    /// Load a previously saved transform, clamping every field into range.
    ///
    /// The restored scale may sit anywhere between the proportional floor and
    /// the pixel floor, since either wheel mode can produce it.
    pub fn load(&mut self, saved: ImageTransform) -> RenderGeometry {
        let floor = self.min_scale().min(SCALE_STEP);
        self.transform = ImageTransform {
            scale: if saved.scale.is_finite() {
                saved.scale.clamp(floor, self.limits.max_scale)
            } else {
                1.0
            },
            rotation_deg: wrap_degrees(saved.rotation_deg),
            flip_horizontal: saved.flip_horizontal,
            flip_vertical: saved.flip_vertical,
            opacity: if saved.opacity.is_finite() {
                saved.opacity.clamp(self.limits.min_opacity, 1.0)
            } else {
                1.0
            },
            collapsed: saved.collapsed,
        };
        self.geometry()
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Pixels(i32),
        Proportional(i32),
        Rotate(i32),
        Snapped(i32),
        Opacity(f32),
        FlipH,
        FlipV,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (-300i32..300).prop_map(Op::Pixels),
            (-8i32..8).prop_map(Op::Proportional),
            (-720i32..720).prop_map(Op::Rotate),
            (-9i32..9).prop_map(Op::Snapped),
            (-1.0f32..1.0).prop_map(Op::Opacity),
            Just(Op::FlipH),
            Just(Op::FlipV),
        ]
    }

    fn run(e: &mut TransformEngine, op: &Op) {
        match *op {
            Op::Pixels(d) => e.adjust_scale_by_pixels(d),
            Op::Proportional(s) => e.adjust_scale_proportional(s),
            Op::Rotate(d) => e.rotate(d),
            Op::Snapped(s) => e.rotate_snapped(s),
            Op::Opacity(d) => e.adjust_opacity(d),
            Op::FlipH => e.toggle_flip_horizontal(),
            Op::FlipV => e.toggle_flip_vertical(),
        };
    }

    proptest! {
        /// Property: every field stays inside its range after any operation sequence.
        #[test]
        fn prop_fields_stay_in_range(
            w in 60u32..2000,
            h in 60u32..2000,
            ops in prop::collection::vec(op_strategy(), 1..40),
        ) {
            let mut e = TransformEngine::new(w, h, WindowSettings::default());
            for op in &ops {
                run(&mut e, op);
                let t = e.transform();
                prop_assert!(t.scale() > 0.0 && t.scale() <= 10.0);
                prop_assert!((0..360).contains(&t.rotation_deg()));
                prop_assert!(t.opacity() >= 0.2 && t.opacity() <= 1.0);
            }
        }

        /// Property: collapse then expand restores scale and opacity bit for bit.
        #[test]
        fn prop_collapse_round_trip(
            ops in prop::collection::vec(op_strategy(), 0..20),
        ) {
            let mut e = TransformEngine::new(640, 480, WindowSettings::default());
            for op in &ops {
                run(&mut e, op);
            }
            let before = *e.transform();
            e.toggle_collapsed();
            e.toggle_collapsed();
            prop_assert_eq!(e.transform().scale().to_bits(), before.scale().to_bits());
            prop_assert_eq!(e.transform().opacity().to_bits(), before.opacity().to_bits());
            prop_assert_eq!(e.geometry(), compute_geometry(640, 480, &before, e.limits()));
        }

        /// Property: two horizontal flips restore the flag and the rotation.
        #[test]
        fn prop_double_flip_is_identity(rotation in -720i32..720) {
            let mut e = TransformEngine::new(300, 200, WindowSettings::default());
            e.rotate(rotation);
            let before = *e.transform();
            e.toggle_flip_horizontal();
            e.toggle_flip_horizontal();
            prop_assert_eq!(*e.transform(), before);
        }
    }
}
