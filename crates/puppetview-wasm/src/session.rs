//! Overlay session bindings.
//!
//! The page captures the screen itself (for example from a `getDisplayMedia`
//! frame), wraps the pixels in a `JsSnapshot` and starts a session on it.
//! Pointer and key events are forwarded as they arrive; `tick` is called
//! from `requestAnimationFrame` with its timestamp.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const session = new JsCropSession(snapshot, settings, (cropped) => openWindow(cropped));
//! canvas.onpointerdown = (e) => session.pointer_down(e.button, e.offsetX, e.offsetY);
//! const loop = (now: number) => {
//!   const frame = session.tick(now, pointerX, pointerY);
//!   if (frame) draw(frame);
//!   if (session.active) requestAnimationFrame(loop);
//! };
//! ```

use crate::input::{button_from_dom, key_from_dom, settings_from_js};
use crate::types::JsSnapshot;
use puppetview_core::geometry::Point;
use puppetview_core::session::{ColorProbeSession, CropSession, ProbeKeyResponse};
use puppetview_core::settings::Settings;
use puppetview_core::snapshot::Snapshot;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

type CropHandler = Box<dyn FnOnce(Snapshot)>;
type ColorHandler = Box<dyn FnOnce(String)>;

/// Screenshot cropping session for JavaScript.
#[wasm_bindgen]
pub struct JsCropSession {
    inner: CropSession<CropHandler>,
    result: Rc<RefCell<Option<Snapshot>>>,
}

#[wasm_bindgen]
impl JsCropSession {
    /// Start selecting on `snapshot`. `on_result` receives a `JsSnapshot`
    /// of the accepted region.
    #[wasm_bindgen(constructor)]
    pub fn new(
        snapshot: &JsSnapshot,
        settings: JsValue,
        on_result: Option<js_sys::Function>,
    ) -> Result<JsCropSession, JsValue> {
        let settings = settings_from_js(settings)?;
        Ok(Self::with_settings(snapshot.as_snapshot().clone(), &settings, on_result))
    }

    /// Repaint tick. Returns the overlay frame to draw, or `undefined`.
    pub fn tick(&mut self, now_ms: f64, x: i32, y: i32) -> Result<JsValue, JsValue> {
        match self.inner.tick(now_ms, Point::new(x, y)) {
            Some(frame) => {
                serde_wasm_bindgen::to_value(&frame).map_err(|e| JsValue::from_str(&e.to_string()))
            }
            None => Ok(JsValue::UNDEFINED),
        }
    }

    /// CSS cursor keyword for the current hover state.
    #[wasm_bindgen(getter)]
    pub fn cursor(&self) -> String {
        self.inner.cursor().css_name().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn active(&self) -> bool {
        self.inner.is_active()
    }

    /// `[left, top, right, bottom]` of the current region.
    pub fn region(&self) -> Option<Vec<i32>> {
        self.inner
            .selector()
            .current_region()
            .map(|r| vec![r.left, r.top, r.right, r.bottom])
    }

    pub fn pointer_down(&mut self, button: i16, x: i32, y: i32) -> bool {
        if let Some(button) = button_from_dom(button) {
            self.inner.pointer_pressed(button, Point::new(x, y));
        }
        self.inner.is_active()
    }

    pub fn pointer_move(&mut self, x: i32, y: i32) -> bool {
        self.inner.pointer_dragged(Point::new(x, y));
        self.inner.is_active()
    }

    pub fn pointer_up(&mut self, button: i16, x: i32, y: i32) -> bool {
        if let Some(button) = button_from_dom(button) {
            self.inner.pointer_released(button, Point::new(x, y));
        }
        self.inner.is_active()
    }

    /// Completed click; `detail` is the DOM click count.
    pub fn click(&mut self, button: i16, detail: u32) -> bool {
        if let Some(button) = button_from_dom(button) {
            self.inner.clicked(button, detail);
        }
        self.inner.is_active()
    }

    pub fn key_down(&mut self, key: &str) -> bool {
        if let Some(key) = key_from_dom(key) {
            self.inner.key_pressed(key);
        }
        self.inner.is_active()
    }

    /// The cropped image, once. For hosts that poll instead of passing a
    /// callback.
    pub fn take_result(&mut self) -> Option<JsSnapshot> {
        self.result.borrow_mut().take().map(JsSnapshot::from_snapshot)
    }
}

impl JsCropSession {
    pub(crate) fn with_settings(
        snapshot: Snapshot,
        settings: &Settings,
        on_result: Option<js_sys::Function>,
    ) -> Self {
        let result = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&result);
        let handler: CropHandler = Box::new(move |cropped: Snapshot| {
            if let Some(callback) = on_result {
                let value = JsValue::from(JsSnapshot::from_snapshot(cropped.clone()));
                if let Err(e) = callback.call1(&JsValue::NULL, &value) {
                    log::warn!("Crop result callback threw: {:?}", e);
                }
            }
            *sink.borrow_mut() = Some(cropped);
        });
        Self {
            inner: CropSession::with_snapshot(snapshot, settings, handler),
            result,
        }
    }
}

/// Color sampling session for JavaScript.
#[wasm_bindgen]
pub struct JsColorProbe {
    inner: ColorProbeSession<ColorHandler>,
    result: Rc<RefCell<Option<String>>>,
}

#[wasm_bindgen]
impl JsColorProbe {
    /// Start sampling on `snapshot`. `on_result` receives the formatted
    /// color string.
    #[wasm_bindgen(constructor)]
    pub fn new(
        snapshot: &JsSnapshot,
        settings: JsValue,
        on_result: Option<js_sys::Function>,
    ) -> Result<JsColorProbe, JsValue> {
        let settings = settings_from_js(settings)?;
        Ok(Self::with_settings(snapshot.as_snapshot().clone(), &settings, on_result))
    }

    /// Repaint tick. Returns the sample and magnifier placement, or
    /// `undefined`.
    pub fn tick(&mut self, now_ms: f64, x: i32, y: i32) -> Result<JsValue, JsValue> {
        match self.inner.tick(now_ms, Point::new(x, y)) {
            Some(frame) => {
                serde_wasm_bindgen::to_value(&frame).map_err(|e| JsValue::from_str(&e.to_string()))
            }
            None => Ok(JsValue::UNDEFINED),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn active(&self) -> bool {
        self.inner.is_active()
    }

    /// Text of the most recent sample.
    #[wasm_bindgen(getter)]
    pub fn text(&self) -> Option<String> {
        self.inner.last_frame().map(|f| f.text.clone())
    }

    /// Any click accepts the color under `(x, y)`.
    pub fn click(&mut self, x: i32, y: i32) -> bool {
        self.inner.clicked(Point::new(x, y));
        self.inner.is_active()
    }

    /// Returns `[x, y]` when the host should move the pointer there.
    pub fn key_down(&mut self, key: &str) -> Option<Vec<i32>> {
        let key = key_from_dom(key)?;
        match self.inner.key_pressed(key) {
            ProbeKeyResponse::MovePointer(p) => Some(vec![p.x, p.y]),
            ProbeKeyResponse::Ignored | ProbeKeyResponse::Finished => None,
        }
    }

    pub fn take_result(&mut self) -> Option<String> {
        self.result.borrow_mut().take()
    }
}

impl JsColorProbe {
    pub(crate) fn with_settings(
        snapshot: Snapshot,
        settings: &Settings,
        on_result: Option<js_sys::Function>,
    ) -> Self {
        let result = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&result);
        let handler: ColorHandler = Box::new(move |text: String| {
            if let Some(callback) = on_result {
                if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(&text)) {
                    log::warn!("Color result callback threw: {:?}", e);
                }
            }
            *sink.borrow_mut() = Some(text);
        });
        Self {
            inner: ColorProbeSession::with_snapshot(snapshot, settings, handler),
            result,
        }
    }
}
