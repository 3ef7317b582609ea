//! User-tunable settings with defaults.
//!
//! Hosts usually deserialize these from their own config store; every field
//! is optional on the wire and falls back to its default.

use crate::color::ColorFormat;
use crate::selection::DEFAULT_HANDLE_SIZE;
use serde::{Deserialize, Serialize};

/// Overlay repaint rate.
pub const DEFAULT_REPAINT_FPS: u32 = 60;

/// Top-level settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Output format of the color probe.
    pub color_format: ColorFormat,
    /// Overlay repaint ticks per second.
    pub repaint_fps: u32,
    /// Side of a resize handle hotspot in pixels.
    pub handle_size: i32,
    pub window: WindowSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color_format: ColorFormat::default(),
            repaint_fps: DEFAULT_REPAINT_FPS,
            handle_size: DEFAULT_HANDLE_SIZE,
            window: WindowSettings::default(),
        }
    }
}

impl Settings {
    /// Replace nonsensical values with usable ones.
    pub fn sanitized(mut self) -> Self {
        self.repaint_fps = self.repaint_fps.clamp(1, 240);
        self.handle_size = self.handle_size.max(1);
        self.window = self.window.sanitized();
        self
    }
}

/// Limits and input speeds for floating image windows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WindowSettings {
    /// Smallest size of the longer image side reachable by wheel scaling.
    pub min_size_px: u32,
    pub max_scale: f64,
    pub min_opacity: f32,
    /// Box the image is shrunk into while collapsed.
    pub collapsed_size_px: u32,
    pub collapsed_opacity: f32,
    /// Pixels per wheel step for free scaling.
    pub scale_wheel_px: i32,
    /// Degrees per wheel step for free rotation.
    pub rotate_wheel_deg: i32,
    /// Opacity change per wheel step.
    pub opacity_wheel_step: f32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            min_size_px: 50,
            max_scale: 10.0,
            min_opacity: 0.2,
            collapsed_size_px: 86,
            collapsed_opacity: 0.75,
            scale_wheel_px: 30,
            rotate_wheel_deg: 5,
            opacity_wheel_step: 0.1,
        }
    }
}

impl WindowSettings {
    /// Replace limits that would leave an empty or inverted range.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !self.max_scale.is_finite() || self.max_scale < 1.0 {
            self.max_scale = defaults.max_scale;
        }
        if !(0.0..=1.0).contains(&self.min_opacity) {
            self.min_opacity = defaults.min_opacity;
        }
        if !(0.0..=1.0).contains(&self.collapsed_opacity) {
            self.collapsed_opacity = defaults.collapsed_opacity;
        }
        if !self.opacity_wheel_step.is_finite() {
            self.opacity_wheel_step = defaults.opacity_wheel_step;
        }
        self.min_size_px = self.min_size_px.max(1);
        self.collapsed_size_px = self.collapsed_size_px.max(1);
        self
    }
}
