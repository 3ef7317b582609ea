//! Floating image window bindings.
//!
//! The page renders each window as an absolutely positioned element: it
//! reads `x`/`y`/`width`/`height`, applies `clip` as a CSS polygon and draws
//! `display_bitmap()` with the geometry's translate, rotation and draw rect.

use crate::input::{button_from_dom, command_from_name, event_name, settings_from_js};
use crate::types::JsSnapshot;
use puppetview_core::geometry::{Point, Quad};
use puppetview_core::input::WheelInput;
use puppetview_core::settings::WindowSettings;
use puppetview_core::window::{ImageState, ImageWindow};
use wasm_bindgen::prelude::*;

/// One floating reference image.
#[wasm_bindgen]
pub struct JsImageWindow {
    inner: ImageWindow,
}

#[wasm_bindgen]
impl JsImageWindow {
    /// Open a window for `bitmap` centered on the pointer.
    #[wasm_bindgen(constructor)]
    pub fn new(
        bitmap: &JsSnapshot,
        pointer_x: i32,
        pointer_y: i32,
        settings: JsValue,
    ) -> Result<JsImageWindow, JsValue> {
        let settings = settings_from_js(settings)?;
        Ok(Self::with_limits(bitmap, Point::new(pointer_x, pointer_y), settings.window))
    }

    /// Rebuild a window from a saved `ImageState` object.
    pub fn from_state(
        bitmap: &JsSnapshot,
        state: JsValue,
        settings: JsValue,
    ) -> Result<JsImageWindow, JsValue> {
        let settings = settings_from_js(settings)?;
        let state: ImageState = serde_wasm_bindgen::from_value(state)
            .map_err(|e| JsValue::from_str(&format!("Invalid window state: {}", e)))?;
        let inner = ImageWindow::from_state(bitmap.as_snapshot().clone(), &state, settings.window)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> i32 {
        self.inner.screen_position().x
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> i32 {
        self.inner.screen_position().y
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> i32 {
        self.inner.geometry().width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> i32 {
        self.inner.geometry().height
    }

    /// Opacity to apply to the window element.
    #[wasm_bindgen(getter)]
    pub fn opacity(&self) -> f32 {
        self.inner.geometry().effective_opacity
    }

    #[wasm_bindgen(getter)]
    pub fn visible(&self) -> bool {
        self.inner.is_visible()
    }

    /// Full render geometry as a plain object.
    pub fn geometry(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.geometry())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Clip polygon as `[x0, y0, x1, y1, x2, y2, x3, y3]`.
    pub fn clip(&self) -> Vec<i32> {
        flatten(&self.inner.geometry().clip)
    }

    /// Border polygon, same layout as `clip`.
    pub fn border(&self) -> Vec<i32> {
        flatten(&self.inner.geometry().border)
    }

    pub fn border_color(&self) -> Vec<u8> {
        self.inner.border_color().to_vec()
    }

    /// Bitmap to draw (greyscale when enabled).
    pub fn display_bitmap(&self) -> JsSnapshot {
        JsSnapshot::from_snapshot(self.inner.display_bitmap().clone())
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.inner.set_hovered(hovered);
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.inner.set_focused(focused);
    }

    pub fn begin_drag(&mut self, x: i32, y: i32) {
        self.inner.begin_drag(Point::new(x, y));
    }

    pub fn drag_to(&mut self, x: i32, y: i32) {
        self.inner.drag_to(Point::new(x, y));
    }

    pub fn end_drag(&mut self) {
        self.inner.end_drag();
    }

    /// Wheel input; `steps` is positive when scrolling down. Returns whether
    /// the geometry changed.
    pub fn wheel(&mut self, steps: i32, ctrl: bool, shift: bool, alt: bool) -> bool {
        self.inner
            .wheel(WheelInput::with_modifiers(steps, ctrl, shift, alt))
            .is_some()
    }

    /// Completed click. Returns an event name such as `"showMenu"`.
    pub fn click(&mut self, button: i16, detail: u32) -> Option<String> {
        let button = button_from_dom(button)?;
        self.inner.click(button, detail).map(|e| event_name(e).to_string())
    }

    /// Run a menu command by name (`"flipHorizontal"`, `"close"`, ...).
    /// Returns the event the owner must handle, if any.
    pub fn command(&mut self, name: &str) -> Result<Option<String>, JsValue> {
        let command = command_from_name(name)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown window command: {}", name)))?;
        Ok(self.inner.apply(command).map(|e| event_name(e).to_string()))
    }

    /// Checkbox states for the context menu.
    pub fn menu_state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.menu_state())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Saved state as a plain object.
    pub fn state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.state()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn restore(&mut self, state: JsValue) -> Result<(), JsValue> {
        let state: ImageState = serde_wasm_bindgen::from_value(state)
            .map_err(|e| JsValue::from_str(&format!("Invalid window state: {}", e)))?;
        self.inner
            .restore(&state)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl JsImageWindow {
    pub(crate) fn with_limits(bitmap: &JsSnapshot, pointer: Point, limits: WindowSettings) -> Self {
        Self {
            inner: ImageWindow::new(bitmap.as_snapshot().clone(), pointer, limits),
        }
    }
}

fn flatten(quad: &Quad) -> Vec<i32> {
    quad.iter().flat_map(|p| [p.x, p.y]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use puppetview_core::snapshot::Snapshot;

    fn test_window() -> JsImageWindow {
        let bitmap = JsSnapshot::from_snapshot(Snapshot::new(120, 60, vec![30; 120 * 60 * 3]).unwrap());
        JsImageWindow::with_limits(&bitmap, Point::new(300, 200), WindowSettings::default())
    }

    #[test]
    fn test_initial_placement() {
        let w = test_window();
        assert_eq!((w.x(), w.y()), (240, 170));
        assert_eq!((w.width(), w.height()), (120, 60));
        assert_eq!(w.clip(), vec![0, 0, 120, 0, 120, 60, 0, 60]);
        assert_eq!(w.border(), vec![0, 0, 119, 0, 119, 59, 0, 59]);
    }

    #[test]
    fn test_wheel_needs_hover() {
        let mut w = test_window();
        assert!(!w.wheel(-1, false, false, false));
        w.set_hovered(true);
        assert!(w.wheel(-1, false, false, false));
        assert_eq!(w.width(), 150);
    }

    #[test]
    fn test_commands_by_name() {
        let mut w = test_window();
        assert_eq!(w.command("toggleCollapsed").ok(), Some(None));
        assert!((w.opacity() - 0.75).abs() < f32::EPSILON);
        assert_eq!(w.command("copyToClipboard").ok(), Some(Some("copyToClipboard".to_string())));
        assert_eq!(w.command("close").ok(), Some(Some("close".to_string())));
    }

    #[test]
    fn test_click_events() {
        let mut w = test_window();
        assert_eq!(w.click(2, 1), Some("showMenu".to_string()));
        assert_eq!(w.click(0, 2), None);
        assert!((w.opacity() - 0.75).abs() < f32::EPSILON);
    }

    #[test]
    fn test_border_color_follows_focus() {
        let mut w = test_window();
        w.set_hovered(true);
        w.set_focused(true);
        assert_eq!(w.border_color(), vec![57, 122, 243]);
    }
}

/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_state_round_trip_through_js() {
        let bitmap = JsSnapshot::new(40, 20, vec![0; 40 * 20 * 3]).unwrap();
        let mut w = JsImageWindow::new(&bitmap, 100, 100, JsValue::UNDEFINED).unwrap();
        w.command("flipVertical").unwrap();
        let state = w.state().unwrap();

        let restored = JsImageWindow::from_state(&bitmap, state, JsValue::UNDEFINED).unwrap();
        assert_eq!((restored.x(), restored.y()), (w.x(), w.y()));
        assert_eq!(restored.clip(), w.clip());
    }

    #[wasm_bindgen_test]
    fn test_unknown_command_is_error() {
        let bitmap = JsSnapshot::new(4, 4, vec![0; 48]).unwrap();
        let mut w = JsImageWindow::new(&bitmap, 0, 0, JsValue::NULL).unwrap();
        assert!(w.command("explode").is_err());
    }
}
