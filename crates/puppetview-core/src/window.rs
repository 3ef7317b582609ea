//! Floating reference image window.
//!
//! An [`ImageWindow`] owns one bitmap and its transform. It keeps the visual
//! center of the image fixed on screen while the image is scaled, rotated,
//! flipped or collapsed: after every recompute the window moves by the
//! negated change of the center in window-local coordinates.

use crate::geometry::Point;
use crate::input::{Button, WheelInput};
use crate::settings::WindowSettings;
use crate::snapshot::{to_greyscale, Snapshot, SnapshotError};
use crate::transform::{ImageTransform, RenderGeometry, TransformEngine};
use once_cell::unsync::OnceCell;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Border color of the focused window under the pointer.
pub const ACTIVE_BORDER_COLOR: [u8; 3] = [57, 122, 243];

/// Border color otherwise.
pub const INACTIVE_BORDER_COLOR: [u8; 3] = [152, 152, 152];

/// Errors raised when restoring a saved window.
#[derive(Debug, Error, PartialEq)]
pub enum StateError {
    #[error("Saved window state has a non-finite {field}")]
    NonFinite { field: &'static str },

    #[error("Saved bitmap is unusable: {0}")]
    Bitmap(#[from] SnapshotError),
}

/// Saved state of one window, as handed to the workspace store.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageState {
    pub visible: bool,
    pub collapsed: bool,
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
    pub greyscale: bool,
    pub scale: f64,
    pub rotation_deg: i32,
    pub opacity: f32,
    /// Window position on screen.
    pub x: i32,
    pub y: i32,
    /// Visual center in window-local coordinates.
    pub center_x: f64,
    pub center_y: f64,
}

/// Entries of the per-window context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindowCommand {
    FlipHorizontal,
    FlipVertical,
    ToggleGreyscale,
    ActualSize,
    ResetRotationAndFlip,
    ResetOpacity,
    ToggleCollapsed,
    CopyToClipboard,
    Hide,
    Close,
}

/// Requests a window makes of its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindowEvent {
    /// Put the displayed bitmap on the clipboard.
    CopyToClipboard,
    /// Show the context menu at the pointer.
    ShowMenu,
    /// Remove the window.
    Close,
}

/// Checkbox states of the context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuState {
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
    pub greyscale: bool,
    pub collapsed: bool,
}

#[derive(Debug, Clone)]
pub struct ImageWindow {
    bitmap: Snapshot,
    greyscale_cache: OnceCell<Snapshot>,
    engine: TransformEngine,
    geometry: RenderGeometry,
    /// Screen position of the window's top-left corner, sub-pixel.
    position: (f64, f64),
    /// Visual center from the previous recompute, window-local.
    last_center: (f64, f64),
    visible: bool,
    greyscale: bool,
    hovered: bool,
    focused: bool,
    drag_start: Option<Point>,
}

impl ImageWindow {
    /// Open a window for `bitmap` centered on `pointer`.
    ///
    /// The top-left corner is kept at non-negative screen coordinates.
    pub fn new(bitmap: Snapshot, pointer: Point, limits: WindowSettings) -> Self {
        let (w, h) = (bitmap.width(), bitmap.height());
        let engine = TransformEngine::new(w, h, limits);
        let geometry = engine.geometry();
        let half_w = i32::try_from(w / 2).unwrap_or(i32::MAX);
        let half_h = i32::try_from(h / 2).unwrap_or(i32::MAX);
        let x = pointer.x.saturating_sub(half_w).max(0);
        let y = pointer.y.saturating_sub(half_h).max(0);

        let mut window = Self {
            bitmap,
            greyscale_cache: OnceCell::new(),
            engine,
            geometry: geometry.clone(),
            position: (f64::from(x), f64::from(y)),
            last_center: (f64::from(w) / 2.0, f64::from(h) / 2.0),
            visible: true,
            greyscale: false,
            hovered: false,
            focused: false,
            drag_start: None,
        };
        window.update(geometry);
        window
    }

    /// Rebuild a saved window.
    pub fn from_state(
        bitmap: Snapshot,
        state: &ImageState,
        limits: WindowSettings,
    ) -> Result<Self, StateError> {
        let mut window = Self::new(bitmap, Point::default(), limits);
        window.restore(state)?;
        Ok(window)
    }

    /// Apply a recomputed geometry and move the window so the visual center
    /// stays where it was on screen.
    fn update(&mut self, geometry: RenderGeometry) -> &RenderGeometry {
        let (cx, cy) = geometry.center;
        self.position.0 -= cx - self.last_center.0;
        self.position.1 -= cy - self.last_center.1;
        self.last_center = geometry.center;
        self.geometry = geometry;
        &self.geometry
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn bitmap(&self) -> &Snapshot {
        &self.bitmap
    }

    /// Bitmap to paint: the original, or its greyscale variant computed on
    /// first use.
    pub fn display_bitmap(&self) -> &Snapshot {
        if self.greyscale {
            self.greyscale_cache.get_or_init(|| {
                log::debug!(
                    "Building greyscale variant for {}x{} bitmap",
                    self.bitmap.width(),
                    self.bitmap.height()
                );
                to_greyscale(&self.bitmap)
            })
        } else {
            &self.bitmap
        }
    }

    pub fn transform(&self) -> &ImageTransform {
        self.engine.transform()
    }

    pub fn geometry(&self) -> &RenderGeometry {
        &self.geometry
    }

    /// Top-left corner on screen, rounded to whole pixels.
    pub fn screen_position(&self) -> Point {
        Point::new(self.position.0.round() as i32, self.position.1.round() as i32)
    }

    /// Visual center of the image on screen.
    pub fn screen_center(&self) -> (f64, f64) {
        (
            self.position.0 + self.last_center.0,
            self.position.1 + self.last_center.1,
        )
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_greyscale(&self) -> bool {
        self.greyscale
    }

    pub fn menu_state(&self) -> MenuState {
        let t = self.engine.transform();
        MenuState {
            flip_horizontal: t.flip_horizontal(),
            flip_vertical: t.flip_vertical(),
            greyscale: self.greyscale,
            collapsed: t.collapsed(),
        }
    }

    pub fn border_color(&self) -> [u8; 3] {
        if self.focused && self.hovered {
            ACTIVE_BORDER_COLOR
        } else {
            INACTIVE_BORDER_COLOR
        }
    }

    // ========================================================================
    // Transform operations
    // ========================================================================

    pub fn set_scale(&mut self, scale: f64) -> &RenderGeometry {
        let g = self.engine.set_scale(scale);
        self.update(g)
    }

    pub fn adjust_scale_by_pixels(&mut self, delta_px: i32) -> &RenderGeometry {
        let g = self.engine.adjust_scale_by_pixels(delta_px);
        self.update(g)
    }

    pub fn adjust_scale_proportional(&mut self, steps: i32) -> &RenderGeometry {
        let g = self.engine.adjust_scale_proportional(steps);
        self.update(g)
    }

    pub fn actual_size(&mut self) -> &RenderGeometry {
        let g = self.engine.actual_size();
        self.update(g)
    }

    pub fn rotate(&mut self, delta_deg: i32) -> &RenderGeometry {
        let g = self.engine.rotate(delta_deg);
        self.update(g)
    }

    pub fn rotate_snapped(&mut self, steps: i32) -> &RenderGeometry {
        let g = self.engine.rotate_snapped(steps);
        self.update(g)
    }

    pub fn toggle_flip_horizontal(&mut self) -> &RenderGeometry {
        let g = self.engine.toggle_flip_horizontal();
        self.update(g)
    }

    pub fn toggle_flip_vertical(&mut self) -> &RenderGeometry {
        let g = self.engine.toggle_flip_vertical();
        self.update(g)
    }

    pub fn reset_rotation_and_flip(&mut self) -> &RenderGeometry {
        let g = self.engine.reset_rotation_and_flip();
        self.update(g)
    }

    pub fn adjust_opacity(&mut self, delta: f32) -> &RenderGeometry {
        let g = self.engine.adjust_opacity(delta);
        self.update(g)
    }

    pub fn reset_opacity(&mut self) -> &RenderGeometry {
        let g = self.engine.reset_opacity();
        self.update(g)
    }

    pub fn toggle_collapsed(&mut self) -> &RenderGeometry {
        let g = self.engine.toggle_collapsed();
        self.update(g)
    }

    // ========================================================================
    // Input
    // ========================================================================

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Primary press at `local` (window coordinates) starts moving the window.
    pub fn begin_drag(&mut self, local: Point) {
        self.drag_start = Some(local);
    }

    /// Pointer moved to `local` while pressed. The window follows.
    pub fn drag_to(&mut self, local: Point) {
        if let Some(start) = self.drag_start {
            self.position.0 += f64::from(local.x - start.x);
            self.position.1 += f64::from(local.y - start.y);
        }
    }

    pub fn end_drag(&mut self) {
        self.drag_start = None;
    }

    /// Click on the window. A primary double click collapses or expands it,
    /// a secondary click asks for the context menu.
    pub fn click(&mut self, button: Button, count: u32) -> Option<WindowEvent> {
        match button {
            Button::Primary if count == 2 => {
                self.toggle_collapsed();
                None
            }
            Button::Secondary => Some(WindowEvent::ShowMenu),
            _ => None,
        }
    }

    /// Wheel over the window. Ignored while collapsed or not hovered.
    ///
    /// | modifiers    | action                                |
    /// |--------------|---------------------------------------|
    /// | ctrl+shift   | snapped rotation by `steps`           |
    /// | ctrl         | free rotation by `steps * 5` degrees  |
    /// | alt          | opacity by `-steps * 0.1`             |
    /// | shift        | proportional scale by `-steps`        |
    /// | none         | longer side by `-steps * 30` pixels   |
    pub fn wheel(&mut self, input: WheelInput) -> Option<&RenderGeometry> {
        if self.engine.transform().collapsed() || !self.hovered {
            return None;
        }

        let limits = self.engine.limits().clone();
        let steps = input.steps;
        let m = input.modifiers;
        let g = if m.ctrl && m.shift {
            self.engine.rotate_snapped(steps)
        } else if m.ctrl {
            self.engine.rotate(steps.saturating_mul(limits.rotate_wheel_deg))
        } else if m.alt {
            self.engine.adjust_opacity(-(steps as f32) * limits.opacity_wheel_step)
        } else if m.shift {
            self.engine.adjust_scale_proportional(steps.saturating_neg())
        } else {
            self.engine
                .adjust_scale_by_pixels(steps.saturating_mul(limits.scale_wheel_px).saturating_neg())
        };
        Some(self.update(g))
    }

    /// Apply a context menu command. Commands that need the owner are
    /// returned as events.
    pub fn apply(&mut self, command: WindowCommand) -> Option<WindowEvent> {
        log::debug!("Window command {:?}", command);
        match command {
            WindowCommand::FlipHorizontal => {
                self.toggle_flip_horizontal();
            }
            WindowCommand::FlipVertical => {
                self.toggle_flip_vertical();
            }
            WindowCommand::ToggleGreyscale => self.greyscale = !self.greyscale,
            WindowCommand::ActualSize => {
                self.actual_size();
            }
            WindowCommand::ResetRotationAndFlip => {
                self.reset_rotation_and_flip();
            }
            WindowCommand::ResetOpacity => {
                self.reset_opacity();
            }
            WindowCommand::ToggleCollapsed => {
                self.toggle_collapsed();
            }
            WindowCommand::CopyToClipboard => return Some(WindowEvent::CopyToClipboard),
            WindowCommand::Hide => self.visible = false,
            WindowCommand::Close => return Some(WindowEvent::Close),
        }
        None
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    pub fn state(&self) -> ImageState {
        let t = self.engine.transform();
        let position = self.screen_position();
        ImageState {
            visible: self.visible,
            collapsed: t.collapsed(),
            flip_horizontal: t.flip_horizontal(),
            flip_vertical: t.flip_vertical(),
            greyscale: self.greyscale,
            scale: t.scale(),
            rotation_deg: t.rotation_deg(),
            opacity: t.opacity(),
            x: position.x,
            y: position.y,
            center_x: self.last_center.0,
            center_y: self.last_center.1,
        }
    }

    /// Load saved state. Fields are clamped into range and the geometry is
    /// recomputed; on error the window is left untouched.
    pub fn restore(&mut self, state: &ImageState) -> Result<(), StateError> {
        let checks = [
            ("scale", state.scale.is_finite()),
            ("opacity", state.opacity.is_finite()),
            ("center_x", state.center_x.is_finite()),
            ("center_y", state.center_y.is_finite()),
        ];
        if let Some(&(field, _)) = checks.iter().find(|(_, ok)| !ok) {
            log::warn!("Rejecting saved window state: non-finite {}", field);
            return Err(StateError::NonFinite { field });
        }

        self.visible = state.visible;
        self.greyscale = state.greyscale;
        self.position = (f64::from(state.x), f64::from(state.y));
        self.last_center = (state.center_x, state.center_y);
        let g = self.engine.load(ImageTransform {
            scale: state.scale,
            rotation_deg: state.rotation_deg,
            flip_horizontal: state.flip_horizontal,
            flip_vertical: state.flip_vertical,
            opacity: state.opacity,
            collapsed: state.collapsed,
        });
        self.update(g);
        Ok(())
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
